//! Profile catalog.
//!
//! The catalog owns an ordered set of validated profiles keyed by name. It provides:
//! 1. **Built-ins:** The six shipped designs, constructed once on first use and shared by
//!    every reader.
//! 2. **Lookup:** Exact, case-sensitive name lookup and listing in registration order.
//! 3. **Registration:** User profiles, validated on entry; names stay unique.
//! 4. **Application:** Validation followed by translation into engine operations.

use std::sync::LazyLock;

use tracing::debug;

use crate::common::error::ProfileError;
use crate::config::SystemConfig;
use crate::engine::{self, AppliedSystem, Engine};
use crate::profile::Profile;

/// Constructors for the shipped profiles.
pub mod builtin;

static BUILTIN: LazyLock<ProfileCatalog> = LazyLock::new(ProfileCatalog::with_builtins);

/// Ordered collection of validated profiles.
///
/// # Examples
///
/// ```
/// use uarch_catalog::{ProfileCatalog, ProfileError};
///
/// let catalog = ProfileCatalog::builtin();
/// assert_eq!(catalog.list_profiles()[0], "Ariane");
/// assert!(matches!(
///     catalog.get_profile("boom"),
///     Err(ProfileError::ProfileNotFound(_))
/// ));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ProfileCatalog {
    profiles: Vec<Profile>,
    config: SystemConfig,
}

impl ProfileCatalog {
    /// Creates an empty catalog with the default system configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// The shared catalog of built-in profiles.
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    /// Creates a catalog holding the six built-in profiles, ready for further
    /// registrations.
    pub fn with_builtins() -> Self {
        Self {
            profiles: builtin::all(),
            config: SystemConfig::default(),
        }
    }

    /// Replaces the system configuration used by [`ProfileCatalog::apply`].
    #[must_use]
    pub fn with_config(mut self, config: SystemConfig) -> Self {
        self.config = config;
        self
    }

    /// System configuration used by [`ProfileCatalog::apply`].
    pub const fn config(&self) -> &SystemConfig {
        &self.config
    }

    /// Adds a profile after validating it.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::InvalidProfile`] if the profile fails validation, or
    /// [`ProfileError::DuplicateProfile`] if its name is already taken.
    pub fn register(&mut self, profile: Profile) -> Result<(), ProfileError> {
        profile.validate()?;
        if self.profiles.iter().any(|p| p.name == profile.name) {
            return Err(ProfileError::DuplicateProfile(profile.name));
        }
        debug!(profile = %profile.name, "registered profile");
        self.profiles.push(profile);
        Ok(())
    }

    /// Profile names in registration order.
    pub fn list_profiles(&self) -> Vec<&str> {
        self.profiles.iter().map(|p| p.name.as_str()).collect()
    }

    /// Returns every profile in registration order.
    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    /// Looks up a profile by exact name.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::ProfileNotFound`] if no profile has that name.
    pub fn get_profile(&self, name: &str) -> Result<&Profile, ProfileError> {
        self.profiles
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| ProfileError::ProfileNotFound(name.to_string()))
    }

    /// Checks a profile against every invariant.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::InvalidProfile`] naming the first violated invariant.
    pub fn validate(&self, profile: &Profile) -> Result<(), ProfileError> {
        profile.validate()
    }

    /// Applies a profile to `engine` with the catalog's system configuration.
    ///
    /// # Errors
    ///
    /// See [`engine::apply()`].
    pub fn apply<E: Engine + ?Sized>(
        &self,
        profile: &Profile,
        engine: &mut E,
    ) -> Result<AppliedSystem, ProfileError> {
        engine::apply(profile, &self.config, engine)
    }

    /// Applies a profile to `engine` with an explicit system configuration.
    ///
    /// # Errors
    ///
    /// See [`engine::apply()`].
    pub fn apply_with<E: Engine + ?Sized>(
        &self,
        profile: &Profile,
        config: &SystemConfig,
        engine: &mut E,
    ) -> Result<AppliedSystem, ProfileError> {
        engine::apply(profile, config, engine)
    }
}
