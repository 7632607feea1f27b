//! Operations module (atomic side effects)

mod inhibit;
mod lifecycle;
mod probe;
mod subkey;

pub use inhibit::{IdleInhibitor, InhibitError, ScreenSaverInhibitor};
pub use lifecycle::{PlaytimeTicker, SleepLock};
pub use probe::{BinaryProbe, HeaderProbe, ProbeResult};
pub use subkey::{negotiate_scope, CredentialClient, ScopedToken};
