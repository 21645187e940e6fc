// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Resolve which zone the local system is configured to use: the `TZ`
//! environment variable if set, else `/etc/localtime`'s target (read as a
//! symlink into the zoneinfo tree), else UTC.

use std::sync::Arc;

use crate::error::Result;
use crate::zone::engine::Zone;

const ZONEINFO_ROOT: &str = "/usr/share/zoneinfo/";

fn name_from_localtime_symlink() -> Option<String> {
    let target = std::fs::read_link("/etc/localtime").ok()?;
    let target = target.to_str()?;
    target.rsplit_once(ZONEINFO_ROOT).map(|(_, name)| name.to_string())
}

/// The name of the zone the process should use absent an explicit
/// selection: `$TZ`, then `/etc/localtime`, then `"UTC"`.
pub fn system_zone_name() -> String {
    if let Ok(tz) = std::env::var("TZ") {
        if !tz.is_empty() {
            log::debug!("using zone `{tz}` from $TZ");
            return tz;
        }
    }
    if let Some(name) = name_from_localtime_symlink() {
        log::debug!("using zone `{name}` from /etc/localtime");
        return name;
    }
    log::debug!("no $TZ or /etc/localtime symlink found, defaulting to UTC");
    "UTC".to_string()
}

/// Load the system's configured zone, per [`system_zone_name`].
pub fn system_zone() -> Result<Arc<Zone>> {
    crate::zone::cache::find(&system_zone_name())
}
