mod http;
mod local;

pub use http::HttpGreetService;
pub use local::LocalGreetService;
