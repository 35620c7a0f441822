//! Shared color scheme, one hue family per layer of the depicted system.

pub const QUPATH_BLUE: &str = "#4A90D9";
pub const QUPATH_LIGHT: &str = "#7AB8F5";
pub const PYTHON_DARK: &str = "#306998";
pub const PYTHON_LIGHT: &str = "#4A7DB8";
pub const PYCROMANAGER: &str = "#E67E22";
pub const MICROMANAGER: &str = "#D35400";
pub const HARDWARE: &str = "#C0392B";
pub const CONFIG: &str = "#27AE60";
pub const DATA: &str = "#9B59B6";
pub const USER: &str = "#3498DB";

// Accents shared by the slide diagrams.
pub const ALERT_RED: &str = "#E74C3C";
pub const FLOW_DARK: &str = "#2C3E50";
pub const RETURN_GRAY: &str = "#7F8C8D";
pub const QPSC_BLUE: &str = "#5DA5E8";
