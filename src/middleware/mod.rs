//! Request middleware: gating, view context, method override, and logging.

pub mod method_override;
pub mod request_log;
pub mod require_sign_in;
pub mod view_context;

pub use method_override::MethodOverride;
pub use request_log::RequestLog;
pub use require_sign_in::{RequireSignIn, SIGN_IN_PATH};
pub use view_context::{CurrentUser, PassPrincipalToView};
