mod add;
mod check;
mod release;
mod status;

pub use add::{AddInput, AddOperation, AddResult};
pub use check::{CheckOperation, CheckOutput};
pub use release::{ReleaseInput, ReleaseOperation, ReleaseOutcome};
pub use status::{StatusOperation, StatusOutput};
