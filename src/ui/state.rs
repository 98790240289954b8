use bevy::prelude::Resource;

/// Top-level views of the dashboard
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Tab {
    #[default]
    Map,
    Imu,
    Gnss,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Map, Tab::Imu, Tab::Gnss];

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Map => "🗺 Map (GNSS)",
            Tab::Imu => "📈 IMU",
            Tab::Gnss => "🛰 GNSS Status",
        }
    }
}

/// Which tab the user has selected, and which view is currently mounted
///
/// The two differ for the frames between a click and the next lifecycle
/// sync; the UI only draws the mounted view.
#[derive(Debug, Default, Resource)]
pub struct ActiveTab {
    pub selected: Tab,
    mounted: Option<Tab>,
}

impl ActiveTab {
    pub fn mounted(&self) -> Option<Tab> {
        self.mounted
    }

    /// Whether the selected view still has to be mounted
    pub fn is_switch_pending(&self) -> bool {
        self.mounted != Some(self.selected)
    }

    pub(crate) fn set_mounted(&mut self, tab: Tab) {
        self.mounted = Some(tab);
    }
}
