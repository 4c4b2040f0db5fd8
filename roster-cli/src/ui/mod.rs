pub mod report;
pub mod widgets;

/// Turn terminal colors on or off for every report
pub fn init(color: bool) {
    if !color {
        colored::control::set_override(false);
    }
}
