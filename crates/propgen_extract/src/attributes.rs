//! Recognized attribute names.

/// Marks a field as backing a generated observable property.
pub const OBSERVABLE: &str = "observable";

/// Lists other properties to notify when this one changes.
pub const NOTIFY_PROPERTY_CHANGED_FOR: &str = "notify_property_changed_for";

/// Lists commands whose can-execute state to refresh when this one changes.
pub const NOTIFY_CAN_EXECUTE_CHANGED_FOR: &str = "notify_can_execute_changed_for";

/// Requests validation of the new value on set.
pub const NOTIFY_DATA_ERROR_INFO: &str = "notify_data_error_info";

/// Requests broadcasting the change to registered recipients.
pub const NOTIFY_PROPERTY_CHANGED_RECIPIENTS: &str = "notify_property_changed_recipients";
