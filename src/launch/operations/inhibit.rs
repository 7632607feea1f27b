//! Idle/display sleep inhibition via the freedesktop ScreenSaver D-Bus API

use std::sync::Mutex;

#[derive(Debug, thiserror::Error)]
#[error("idle inhibitor: {0}")]
pub struct InhibitError(pub String);

impl From<zbus::Error> for InhibitError {
    fn from(e: zbus::Error) -> Self {
        InhibitError(e.to_string())
    }
}

/// Process-global "don't sleep" lock. Every successful `acquire` must be
/// paired with exactly one `release` of the returned cookie.
pub trait IdleInhibitor {
    fn acquire(&self, reason: &str) -> Result<u32, InhibitError>;
    fn release(&self, cookie: u32) -> Result<(), InhibitError>;
}

/// The inhibition is tied to the D-Bus connection that requested it, so the
/// connection is kept alive for as long as this value lives.
pub struct ScreenSaverInhibitor {
    conn: Mutex<Option<zbus::blocking::Connection>>,
}

impl ScreenSaverInhibitor {
    pub fn new() -> Self {
        Self {
            conn: Mutex::new(None),
        }
    }

    fn connection(&self) -> Result<zbus::blocking::Connection, InhibitError> {
        let mut guard = self
            .conn
            .lock()
            .map_err(|_| InhibitError("connection lock poisoned".to_string()))?;
        if let Some(conn) = guard.as_ref() {
            return Ok(conn.clone());
        }
        let conn = zbus::blocking::Connection::session()?;
        *guard = Some(conn.clone());
        Ok(conn)
    }
}

fn screensaver_proxy(
    conn: &zbus::blocking::Connection,
) -> Result<zbus::blocking::Proxy<'_>, InhibitError> {
    Ok(zbus::blocking::Proxy::new(
        conn,
        "org.freedesktop.ScreenSaver",
        "/org/freedesktop/ScreenSaver",
        "org.freedesktop.ScreenSaver",
    )?)
}

impl Default for ScreenSaverInhibitor {
    fn default() -> Self {
        Self::new()
    }
}

impl IdleInhibitor for ScreenSaverInhibitor {
    fn acquire(&self, reason: &str) -> Result<u32, InhibitError> {
        let conn = self.connection()?;
        let proxy = screensaver_proxy(&conn)?;
        let cookie: u32 = proxy.call("Inhibit", &("cavelaunch", reason))?;
        tracing::debug!("launch::inhibit - Inhibited idle sleep (cookie {})", cookie);
        Ok(cookie)
    }

    fn release(&self, cookie: u32) -> Result<(), InhibitError> {
        let conn = self.connection()?;
        let proxy = screensaver_proxy(&conn)?;
        let _: () = proxy.call("UnInhibit", &(cookie,))?;
        tracing::debug!("launch::inhibit - Released idle sleep (cookie {})", cookie);
        Ok(())
    }
}
