mod errors;
mod traits;

pub use errors::MdpError;
pub use traits::{Mdp, MdpAgent};
