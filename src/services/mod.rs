pub mod launcher;

pub use launcher::{DesktopConfig, GsettingsDesktop, LaunchRequest, Launcher, ProcessLauncher};
