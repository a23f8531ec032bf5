//! The seam between the consent core and the browser cookie store.
//!
//! The core never touches cookie values: it reads the live cookie header
//! for names only, and writes expiring `Set-Cookie` lines during a
//! best-effort purge. [`CookieSource`] captures exactly that surface so
//! the rest of the crate stays independent of any particular host
//! environment.

use std::cell::RefCell;
use time::OffsetDateTime;

/// Read/write access to a cookie store, scoped to what the consent core
/// actually needs.
pub trait CookieSource {
    /// The live cookie header (`name=value; name2=value2`), or `None` when
    /// no cookie context exists (non-browser execution). A missing context
    /// is the normal "nothing detected" case, not a failure.
    fn cookie_header(&self) -> Option<String>;

    /// Apply a `Set-Cookie`-shaped line to the store. Used only by the
    /// purge path to overwrite cookies with expired values; sources that
    /// cannot write simply ignore the call.
    fn write_cookie(&self, set_cookie_line: &str);
}

/// A source with no cookie context at all. Reads yield `None`, writes are
/// dropped.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCookieContext;

impl CookieSource for NoCookieContext {
    fn cookie_header(&self) -> Option<String> {
        None
    }

    fn write_cookie(&self, _set_cookie_line: &str) {}
}

#[derive(Debug, Clone)]
struct JarCookie {
    name: String,
    value: String,
    /// Models Secure/HttpOnly cookies: visible in the header but immune
    /// to client-side writes, like the real Cloudflare cookies.
    protected: bool,
}

/// In-memory cookie jar for tests and non-browser embeddings.
///
/// Honors expiring writes the way a browser does: a line with `Max-Age=0`
/// or a past `Expires` removes the named cookie instead of setting it.
#[derive(Debug, Default)]
pub struct MemoryCookieJar {
    cookies: RefCell<Vec<JarCookie>>,
}

impl MemoryCookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a jar from a list of cookie names (empty values).
    pub fn with_names(names: &[&str]) -> Self {
        let jar = Self::new();
        for name in names {
            jar.set(name, "");
        }
        jar
    }

    /// Insert or replace a cookie.
    pub fn set(&self, name: &str, value: &str) {
        self.insert(name, value, false);
    }

    /// Insert or replace a cookie that ignores client-side writes, like a
    /// Secure/HttpOnly cookie set by the server.
    pub fn set_protected(&self, name: &str, value: &str) {
        self.insert(name, value, true);
    }

    fn insert(&self, name: &str, value: &str, protected: bool) {
        let mut cookies = self.cookies.borrow_mut();
        cookies.retain(|c| c.name != name);
        cookies.push(JarCookie {
            name: name.to_string(),
            value: value.to_string(),
            protected,
        });
    }

    pub fn contains(&self, name: &str) -> bool {
        self.cookies.borrow().iter().any(|c| c.name == name)
    }

    pub fn len(&self) -> usize {
        self.cookies.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.borrow().is_empty()
    }
}

impl CookieSource for MemoryCookieJar {
    fn cookie_header(&self) -> Option<String> {
        let cookies = self.cookies.borrow();
        let header = cookies
            .iter()
            .map(|c| format!("{}={}", c.name, c.value))
            .collect::<Vec<_>>()
            .join("; ");
        Some(header)
    }

    fn write_cookie(&self, set_cookie_line: &str) {
        let Ok(parsed) = cookie::Cookie::parse(set_cookie_line) else {
            tracing::debug!(line = %set_cookie_line, "ignoring unparseable cookie line");
            return;
        };

        let now = OffsetDateTime::now_utc();
        let expired = parsed
            .max_age()
            .map(|age| age.is_zero() || age.is_negative())
            .unwrap_or(false)
            || parsed
                .expires()
                .and_then(|e| e.datetime())
                .map(|when| when <= now)
                .unwrap_or(false);

        let mut cookies = self.cookies.borrow_mut();
        if let Some(existing) = cookies.iter().position(|c| c.name == parsed.name()) {
            if cookies[existing].protected {
                // Browsers silently drop client-side writes to HttpOnly
                // cookies; so do we.
                return;
            }
            if expired {
                cookies.remove(existing);
            } else {
                cookies[existing].value = parsed.value().to_string();
            }
        } else if !expired {
            cookies.push(JarCookie {
                name: parsed.name().to_string(),
                value: parsed.value().to_string(),
                protected: false,
            });
        }
    }
}
