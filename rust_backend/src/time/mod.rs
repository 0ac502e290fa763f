pub mod zone;

pub use zone::{
    local_date, local_day_bounds, local_day_start, local_noon_utc, local_to_utc, resolve_timezone,
    DEFAULT_TIMEZONE,
};
