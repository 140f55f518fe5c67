use proptest::prelude::*;

/// Valid key namespaces
pub fn namespace_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9_.-]{1,32}"
}

/// Valid key values, which may also contain '/'
pub fn value_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9_./-]{1,48}"
}

/// A subscriber option set: (priority, accepts_cancelled)
pub fn subscription_strategy() -> impl Strategy<Value = (i32, bool)> {
    (-5i32..5, any::<bool>())
}

/// Subscription lists including duplicated priorities
pub fn subscriptions_strategy() -> impl Strategy<Value = Vec<(i32, bool)>> {
    prop::collection::vec(subscription_strategy(), 0..24)
}
