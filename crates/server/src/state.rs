use service::directory::DirectoryService;

/// Shared handler state; cloning is cheap.
#[derive(Clone)]
pub struct ServerState {
    pub directory: DirectoryService,
}

impl ServerState {
    pub fn new(directory: DirectoryService) -> Self {
        Self { directory }
    }
}
