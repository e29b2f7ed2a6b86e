//! The shared tracker contract: credential and timezone state, UTC offset
//! correction and the lazily built sport mapper.

use crate::config::TrackerConfig;
use crate::logging::Logger;
use crate::sport::SportMapper;
use crate::TrackerError;
use chrono::{DateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use secrecy::SecretString;
use std::fmt;
use std::sync::{Arc, Mutex};

/// State shared by every vendor tracker.
///
/// Vendor clients embed one of these and expose it through
/// [`Tracker::core`]; all common behavior lives here so a vendor crate only
/// supplies its network client and its sport-mapping table.
pub struct TrackerCore {
    logger: Arc<dyn Logger>,
    username: Option<String>,
    password: Option<SecretString>,
    time_zone: Tz,
    // One-shot cache, guarded so concurrent first calls construct at most
    // once. A failed construction leaves the slot empty.
    sport_mapper: Mutex<Option<Arc<dyn SportMapper>>>,
}

impl TrackerCore {
    /// Create the shared state. Credentials are stored as given, without
    /// validation, and are immutable afterwards. The timezone starts at UTC.
    pub fn new(
        logger: Arc<dyn Logger>,
        username: Option<String>,
        password: Option<SecretString>,
    ) -> Self {
        Self {
            logger,
            username,
            password,
            time_zone: Tz::UTC,
            sport_mapper: Mutex::new(None),
        }
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn password(&self) -> Option<&SecretString> {
        self.password.as_ref()
    }

    pub fn logger(&self) -> &Arc<dyn Logger> {
        &self.logger
    }

    /// The timezone the vendor reports workout timestamps in.
    pub fn time_zone(&self) -> Tz {
        self.time_zone
    }

    pub fn set_time_zone(&mut self, time_zone: Tz) {
        self.time_zone = time_zone;
    }

    /// Resolve an IANA zone name and store it. Unresolvable identifiers are
    /// rejected with [`TrackerError::InvalidTimezone`]; the stored zone is
    /// left untouched in that case.
    pub fn set_time_zone_named(&mut self, name: &str) -> Result<(), TrackerError> {
        let time_zone = name
            .parse()
            .map_err(|_| TrackerError::InvalidTimezone(name.to_string()))?;
        self.time_zone = time_zone;
        Ok(())
    }

    /// Signed seconds to add to a vendor-local wall-clock timestamp to reach
    /// UTC, observed at the current instant.
    ///
    /// This is now-relative: the offset reflects the DST regime in effect at
    /// the moment of the call, not at the workout's own instant. Exact only
    /// when both fall under the same regime; see [`Self::time_zone_offset_at`]
    /// for callers that know the workout's actual moment.
    pub fn time_zone_offset(&self) -> i32 {
        self.time_zone_offset_at(Utc::now())
    }

    /// [`Self::time_zone_offset`] evaluated at a caller-supplied instant.
    pub fn time_zone_offset_at(&self, instant: DateTime<Utc>) -> i32 {
        let at = instant.naive_utc();
        let tracker_offset = self
            .time_zone
            .offset_from_utc_datetime(&at)
            .fix()
            .local_minus_utc();
        // Always zero, kept symmetric with the tracker side.
        let utc_offset = Tz::UTC.offset_from_utc_datetime(&at).fix().local_minus_utc();
        utc_offset - tracker_offset
    }

    /// Return the cached sport mapper, building it with `init` on first use.
    ///
    /// The lock is held across `init`, so the mapper is constructed at most
    /// once per instance even under concurrent first calls — which also means
    /// `init` must not re-enter this accessor. An `init` failure propagates
    /// unchanged and caches nothing; a later call retries.
    pub fn sport_mapper_or_init<F>(&self, init: F) -> Result<Arc<dyn SportMapper>, TrackerError>
    where
        F: FnOnce() -> Result<Arc<dyn SportMapper>, TrackerError>,
    {
        // A panicking `init` poisons the lock but never writes the slot, so
        // the inner state stays consistent and later calls may still retry.
        let mut slot = self
            .sport_mapper
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if let Some(mapper) = slot.as_ref() {
            return Ok(Arc::clone(mapper));
        }
        let mapper = init()?;
        *slot = Some(Arc::clone(&mapper));
        Ok(mapper)
    }
}

impl fmt::Debug for TrackerCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackerCore")
            .field("username", &self.username)
            .field("password", &self.password)
            .field("time_zone", &self.time_zone)
            .finish_non_exhaustive()
    }
}

/// The capability contract every vendor tracker implements.
///
/// Required methods are the vendor-specific hooks; everything else is
/// provided on top of the embedded [`TrackerCore`].
pub trait Tracker: Send + Sync {
    /// Stable vendor identifier, e.g. `"polar"`.
    fn id(&self) -> &'static str;

    /// Constructor hook used by [`Tracker::from_config`] so the factory
    /// builds the concrete vendor type it is invoked through.
    fn with_credentials(
        logger: Arc<dyn Logger>,
        username: Option<String>,
        password: Option<SecretString>,
    ) -> Self
    where
        Self: Sized;

    fn core(&self) -> &TrackerCore;

    fn core_mut(&mut self) -> &mut TrackerCore;

    /// Build this vendor's sport mapper. Called at most once per instance,
    /// lazily, by [`Tracker::sport_mapper`]; must return a mapper that is
    /// usable without further initialization.
    ///
    /// Must not call back into [`Tracker::sport_mapper`]: the cache lock is
    /// held across this hook, and the reentrant call would deadlock.
    fn construct_sport_mapper(&self) -> Result<Arc<dyn SportMapper>, TrackerError>;

    /// Build a tracker from a configuration record.
    ///
    /// All required fields are validated before anything is constructed, so
    /// a failure never leaks a partially configured instance. The config's
    /// timezone always replaces the UTC default.
    fn from_config(logger: Arc<dyn Logger>, config: &TrackerConfig) -> Result<Self, TrackerError>
    where
        Self: Sized,
    {
        let username = config.username()?.to_string();
        let password = config.password()?.clone();
        let time_zone = config.time_zone()?;

        let mut tracker = Self::with_credentials(logger, Some(username), Some(password));
        tracker.core_mut().set_time_zone(time_zone);
        Ok(tracker)
    }

    /// The sport mapper, built on first call via
    /// [`Tracker::construct_sport_mapper`] and cached for the lifetime of the
    /// instance. Hook failures propagate unchanged and are not cached.
    fn sport_mapper(&self) -> Result<Arc<dyn SportMapper>, TrackerError> {
        self.core()
            .sport_mapper_or_init(|| self.construct_sport_mapper())
    }

    fn time_zone(&self) -> Tz {
        self.core().time_zone()
    }

    fn set_time_zone(&mut self, time_zone: Tz) {
        self.core_mut().set_time_zone(time_zone);
    }

    fn set_time_zone_named(&mut self, name: &str) -> Result<(), TrackerError> {
        self.core_mut().set_time_zone_named(name)
    }

    /// Now-relative UTC correction in signed seconds; see
    /// [`TrackerCore::time_zone_offset`].
    fn time_zone_offset(&self) -> i32 {
        self.core().time_zone_offset()
    }

    fn time_zone_offset_at(&self, instant: DateTime<Utc>) -> i32 {
        self.core().time_zone_offset_at(instant)
    }

    fn username(&self) -> Option<&str> {
        self.core().username()
    }

    fn password(&self) -> Option<&SecretString> {
        self.core().password()
    }

    fn logger(&self) -> &Arc<dyn Logger> {
        self.core().logger()
    }
}
