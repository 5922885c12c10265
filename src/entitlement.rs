// src/entitlement.rs
//! Paid-feature gate for the viewer.
//!
//! The viewer only asks three things of the payment provider: who the user
//! is, and how to send them to checkout or login. Anything that answers those
//! is an [`Entitlement`].

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::consts::LICENSE_FILE;
use crate::file::open_with_system;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    pub paid: bool,
    pub subscription_status: Option<String>,
    pub plan: Option<String>,
    pub email: Option<String>,
}

impl User {
    pub fn is_unlocked(&self) -> bool {
        self.paid || self.subscription_status.as_deref() == Some("active")
    }
}

pub trait Entitlement {
    /// `None` when nobody is signed in or the provider cannot be reached.
    fn get_user(&mut self) -> Option<User>;
    fn open_checkout(&mut self, plan: Option<&str>);
    fn open_login_page(&mut self);
}

/// Always paid. Used by the CLI and tests.
pub struct Unlocked;

impl Entitlement for Unlocked {
    fn get_user(&mut self) -> Option<User> {
        Some(User { paid: true, ..User::default() })
    }
    fn open_checkout(&mut self, _plan: Option<&str>) {}
    fn open_login_page(&mut self) {}
}

/// License JSON on disk, written by the provider's checkout flow.
/// Checkout/login pages come from `CSG_CHECKOUT_URL` / `CSG_LOGIN_URL`.
pub struct LicenseFile {
    path: PathBuf,
}

impl Default for LicenseFile {
    fn default() -> Self { Self::new(LICENSE_FILE) }
}

impl LicenseFile {
    pub fn new(path: impl Into<PathBuf>) -> Self { Self { path: path.into() } }

    pub fn path(&self) -> &Path { &self.path }

    fn open_env_url(var: &str, plan: Option<&str>) {
        let Ok(mut url) = std::env::var(var) else {
            loge!("Entitlement: {var} not set, nothing to open");
            return;
        };
        if let Some(plan) = plan {
            let sep = if url.contains('?') { '&' } else { '?' };
            url = format!("{url}{sep}plan={plan}");
        }
        match open_with_system(OsStr::new(&url)) {
            Ok(()) => logf!("Entitlement: opened {url}"),
            Err(e) => loge!("Entitlement: {e}"),
        }
    }
}

impl Entitlement for LicenseFile {
    fn get_user(&mut self) -> Option<User> {
        let text = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str::<User>(&text) {
            Ok(user) => Some(user),
            Err(e) => {
                loge!("Entitlement: bad license file {}: {e}", self.path.display());
                None
            }
        }
    }

    fn open_checkout(&mut self, plan: Option<&str>) {
        Self::open_env_url("CSG_CHECKOUT_URL", plan);
    }

    fn open_login_page(&mut self) {
        Self::open_env_url("CSG_LOGIN_URL", None);
    }
}
