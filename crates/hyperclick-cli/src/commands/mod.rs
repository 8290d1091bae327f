pub mod resolve;
pub mod roots;
pub mod version;
