// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! A process-wide cache of loaded zones, keyed by IANA name, so repeated
//! lookups of e.g. "America/New_York" read the zoneinfo file once.

use crate::error::{Result, TimeError};
use crate::zone::engine::Zone;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, RwLock};

const ZONEINFO_ROOT: &str = "/usr/share/zoneinfo";

fn cache() -> &'static RwLock<HashMap<String, Arc<Zone>>> {
    static CACHE: OnceLock<RwLock<HashMap<String, Arc<Zone>>>> = OnceLock::new();
    CACHE.get_or_init(|| RwLock::new(HashMap::new()))
}

fn load_from_disk(name: &str) -> Result<Zone> {
    if name.contains("..") {
        return Err(TimeError::ZoneNotFound(name.to_string()));
    }
    let path = std::path::Path::new(ZONEINFO_ROOT).join(name);
    log::debug!("loading zoneinfo for `{name}` from {}", path.display());
    let bytes = std::fs::read(&path).map_err(|_| TimeError::ZoneNotFound(name.to_string()))?;
    let tzif = crate::zone::tzif::parse(&bytes)?;
    Zone::from_tzif(name.to_string(), tzif)
}

/// Look up a zone by IANA name (e.g. `"Europe/Berlin"`), loading and
/// caching it from the system zoneinfo database on first use.
pub fn find(name: &str) -> Result<Arc<Zone>> {
    if let Some(zone) = cache().read().unwrap().get(name) {
        return Ok(zone.clone());
    }
    let zone = Arc::new(load_from_disk(name)?);
    cache().write().unwrap().insert(name.to_string(), zone.clone());
    log::info!("cached zone `{name}`");
    Ok(zone)
}

/// Drop every cached zone. Mainly useful for tests that swap out
/// `/usr/share/zoneinfo` contents underneath a running process.
pub fn clear() {
    cache().write().unwrap().clear();
}
