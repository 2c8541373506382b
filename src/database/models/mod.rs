pub mod content;
pub mod global;
pub mod site;

pub use content::ContentRow;
pub use global::Global;
pub use site::Site;
