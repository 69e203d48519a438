//! Per-operation deadlines for the data-access layer.
//!
//! Defaults are proportional to the expected cost of each query: single-row
//! writes are cheap, the paginated N+1 listing is the most expensive.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreTimeouts {
    pub schema: Duration,
    pub create_user: Duration,
    pub delete_user: Duration,
    pub create_car: Duration,
    pub get_user: Duration,
    pub list_users: Duration,
    pub update_user: Duration,
    pub update_car: Duration,
}

impl Default for StoreTimeouts {
    fn default() -> Self {
        Self {
            schema: Duration::from_secs(10),
            create_user: Duration::from_secs(6),
            delete_user: Duration::from_secs(6),
            create_car: Duration::from_secs(10),
            get_user: Duration::from_secs(15),
            list_users: Duration::from_secs(25),
            update_user: Duration::from_secs(10),
            update_car: Duration::from_secs(10),
        }
    }
}

impl StoreTimeouts {
    /// Same deadline for every operation (handy in tests).
    pub fn uniform(after: Duration) -> Self {
        Self {
            schema: after,
            create_user: after,
            delete_user: after,
            create_car: after,
            get_user: after,
            list_users: after,
            update_user: after,
            update_car: after,
        }
    }

    /// Multiply every default by `factor`. Factors outside `0.0..=1000.0`
    /// leave the defaults untouched.
    pub fn scaled(factor: f64) -> Self {
        let base = Self::default();
        if !factor.is_finite() || !(0.0..=1000.0).contains(&factor) {
            return base;
        }
        let scale = |d: Duration| d.mul_f64(factor);
        Self {
            schema: scale(base.schema),
            create_user: scale(base.create_user),
            delete_user: scale(base.delete_user),
            create_car: scale(base.create_car),
            get_user: scale(base.get_user),
            list_users: scale(base.list_users),
            update_user: scale(base.update_user),
            update_car: scale(base.update_car),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_has_the_longest_default_deadline() {
        let t = StoreTimeouts::default();
        assert_eq!(t.list_users, Duration::from_secs(25));
        assert!(t.list_users > t.get_user && t.get_user > t.create_car);
        assert_eq!(t.create_user, Duration::from_secs(6));
    }

    #[test]
    fn scaling_multiplies_every_deadline() {
        let t = StoreTimeouts::scaled(0.5);
        assert_eq!(t.create_user, Duration::from_secs(3));
        assert_eq!(t.list_users, Duration::from_millis(12_500));
    }

    #[test]
    fn bogus_scale_falls_back_to_defaults() {
        assert_eq!(StoreTimeouts::scaled(f64::NAN), StoreTimeouts::default());
        assert_eq!(StoreTimeouts::scaled(-1.0), StoreTimeouts::default());
    }
}
