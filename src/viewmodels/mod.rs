pub mod session_viewmodel;
pub mod page_viewmodel;
pub mod request_viewmodel;

pub use session_viewmodel::SessionViewModel;
pub use page_viewmodel::{resolve_page, EndpointAccess, PageView};
pub use request_viewmodel::RequestViewModel;
