use crate::error::ClientError;

/// Load state of a single remote resource as a view sees it.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ResourceState<T> {
    #[default]
    Idle,
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> ResourceState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ResourceState::Loading)
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            ResourceState::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ResourceState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Issued by [`Resource::begin`]; only the newest ticket may settle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket(u64);

/// A view's resource plus the generation of its newest fetch. Responses
/// for superseded fetches are dropped instead of overwriting newer data.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Resource<T> {
    state: ResourceState<T>,
    generation: u64,
}

impl<T> Resource<T> {
    pub fn new() -> Self {
        Self {
            state: ResourceState::Idle,
            generation: 0,
        }
    }

    pub fn state(&self) -> &ResourceState<T> {
        &self.state
    }

    /// `idle|loaded|failed → loading`.
    pub fn begin(&mut self) -> Ticket {
        self.generation += 1;
        self.state = ResourceState::Loading;
        Ticket(self.generation)
    }

    /// `loading → loaded|failed`. Returns false when the ticket is stale.
    pub fn settle(&mut self, ticket: Ticket, result: Result<T, ClientError>) -> bool {
        if ticket.0 != self.generation {
            return false;
        }
        self.state = match result {
            Ok(value) => ResourceState::Loaded(value),
            Err(e) => ResourceState::Failed(e.user_message()),
        };
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_cycle() {
        let mut resource = Resource::<Vec<u32>>::new();
        assert_eq!(resource.state(), &ResourceState::Idle);

        let ticket = resource.begin();
        assert!(resource.state().is_loading());

        assert!(resource.settle(ticket, Ok(vec![1, 2])));
        assert_eq!(resource.state().loaded(), Some(&vec![1, 2]));

        // Mutation-triggered refetch goes back through loading.
        let ticket = resource.begin();
        assert!(resource.state().is_loading());
        assert!(resource.settle(ticket, Ok(vec![1])));
        assert_eq!(resource.state().loaded(), Some(&vec![1]));
    }

    #[test]
    fn failure_is_an_explicit_state() {
        let mut resource = Resource::<u32>::new();
        let ticket = resource.begin();
        resource.settle(
            ticket,
            Err(ClientError::Status {
                path: "/api/posts/gone".into(),
                status: 404,
                message: "Not found".into(),
            }),
        );
        assert_eq!(resource.state().error(), Some("not found"));
    }

    #[test]
    fn stale_settle_is_ignored() {
        let mut resource = Resource::<&str>::new();
        let first = resource.begin();
        let second = resource.begin();

        assert!(resource.settle(second, Ok("fresh")));
        assert!(!resource.settle(first, Ok("stale")));
        assert_eq!(resource.state().loaded(), Some(&"fresh"));
    }
}
