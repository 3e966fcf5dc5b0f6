//! Menu model: ring topics, navigation position and the static menu table.

/// Feature categories shown on the top-level ring.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Topic {
    Wifi,
    Bluetooth,
    Ir,
    Rf,
    Nrf,
    Radio,
    Gps,
    Rpi,
    BadUsb,
    Settings,
    Extras,
    Files,
    Rfid,
    Nfc,
}

impl Topic {
    pub const COUNT: usize = 14;

    /// Ring order, index 0 first.
    pub const ALL: [Topic; Self::COUNT] = [
        Topic::Wifi,
        Topic::Bluetooth,
        Topic::Ir,
        Topic::Rf,
        Topic::Nrf,
        Topic::Radio,
        Topic::Gps,
        Topic::Rpi,
        Topic::BadUsb,
        Topic::Settings,
        Topic::Extras,
        Topic::Files,
        Topic::Rfid,
        Topic::Nfc,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn entry(self) -> &'static MenuEntry {
        &MENU_TABLE[self.index()]
    }

    pub fn label(self) -> &'static str {
        self.entry().label
    }

    pub fn options(self) -> &'static [&'static str] {
        self.entry().options
    }
}

/// Currently displayed navigation position.
///
/// `Menu` is a ring entry, `Submenu` the option list drilled into from it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MenuState {
    Menu(Topic),
    Submenu(Topic),
}

impl Default for MenuState {
    fn default() -> Self {
        Self::Menu(Topic::Wifi)
    }
}

impl MenuState {
    pub const fn topic(self) -> Topic {
        match self {
            Self::Menu(topic) | Self::Submenu(topic) => topic,
        }
    }
}

/// One row of the menu table.
#[derive(Debug)]
pub struct MenuEntry {
    pub topic: Topic,
    pub label: &'static str,
    /// Ring target taken on the B edge.
    pub advance: Topic,
    /// Ring target taken on the C edge.
    pub retreat: Topic,
    /// Submenu rows; index 0 is always the back row.
    pub options: &'static [&'static str],
}

pub const BACK_OPTION: &str = "<- Back";

const WIFI_OPTIONS: &[&str] = &[BACK_OPTION, "Scan", "Beacon Spam", "Deauth", "Probe Sniff"];
const BLUETOOTH_OPTIONS: &[&str] = &[BACK_OPTION, "Scan", "BLE Spam", "Sniff"];
const IR_OPTIONS: &[&str] = &[BACK_OPTION, "B-Gone", "Send", "Replay", "Read", "Saved"];
const RF_OPTIONS: &[&str] = &[BACK_OPTION, "Scan", "Replay", "Jammer"];
const NRF_OPTIONS: &[&str] = &[BACK_OPTION, "Scan", "Spectrum", "Mousejack"];
const RADIO_OPTIONS: &[&str] = &[BACK_OPTION, "FM Tune", "Scanner"];
const GPS_OPTIONS: &[&str] = &[BACK_OPTION, "Position", "Satellites", "Wardrive"];
const RPI_OPTIONS: &[&str] = &[BACK_OPTION, "Connect", "Shell", "Status"];
const BADUSB_OPTIONS: &[&str] = &[BACK_OPTION, "Run Script", "Scripts", "Layout"];
const SETTINGS_OPTIONS: &[&str] = &[BACK_OPTION, "Brightness", "Sleep", "Rotation", "About"];
const EXTRAS_OPTIONS: &[&str] = &[BACK_OPTION, "Stopwatch", "Flashlight", "Dice"];
const FILES_OPTIONS: &[&str] = &[BACK_OPTION, "Browse", "Storage"];
const RFID_OPTIONS: &[&str] = &[BACK_OPTION, "Read", "Clone", "Saved"];
const NFC_OPTIONS: &[&str] = &[BACK_OPTION, "Read", "Emulate", "Saved"];

/// Indexed by `Topic::index`.
pub static MENU_TABLE: [MenuEntry; Topic::COUNT] = [
    MenuEntry {
        topic: Topic::Wifi,
        label: "WiFi",
        advance: Topic::Nfc,
        retreat: Topic::Bluetooth,
        options: WIFI_OPTIONS,
    },
    MenuEntry {
        topic: Topic::Bluetooth,
        label: "Bluetooth",
        advance: Topic::Wifi,
        retreat: Topic::Ir,
        options: BLUETOOTH_OPTIONS,
    },
    MenuEntry {
        topic: Topic::Ir,
        label: "IR",
        advance: Topic::Bluetooth,
        retreat: Topic::Rf,
        options: IR_OPTIONS,
    },
    MenuEntry {
        topic: Topic::Rf,
        label: "RF",
        advance: Topic::Ir,
        retreat: Topic::Nrf,
        options: RF_OPTIONS,
    },
    MenuEntry {
        topic: Topic::Nrf,
        label: "NRF24",
        advance: Topic::Rf,
        retreat: Topic::Radio,
        options: NRF_OPTIONS,
    },
    MenuEntry {
        topic: Topic::Radio,
        label: "Radio",
        advance: Topic::Nrf,
        retreat: Topic::Gps,
        options: RADIO_OPTIONS,
    },
    MenuEntry {
        topic: Topic::Gps,
        label: "GPS",
        advance: Topic::Radio,
        retreat: Topic::Rpi,
        options: GPS_OPTIONS,
    },
    MenuEntry {
        topic: Topic::Rpi,
        label: "RPi",
        advance: Topic::Gps,
        retreat: Topic::BadUsb,
        options: RPI_OPTIONS,
    },
    MenuEntry {
        topic: Topic::BadUsb,
        label: "BadUSB",
        advance: Topic::Rpi,
        retreat: Topic::Settings,
        options: BADUSB_OPTIONS,
    },
    MenuEntry {
        topic: Topic::Settings,
        label: "Settings",
        advance: Topic::BadUsb,
        retreat: Topic::Extras,
        options: SETTINGS_OPTIONS,
    },
    MenuEntry {
        topic: Topic::Extras,
        label: "Extras",
        advance: Topic::Settings,
        retreat: Topic::Files,
        options: EXTRAS_OPTIONS,
    },
    MenuEntry {
        topic: Topic::Files,
        label: "Files",
        advance: Topic::Extras,
        retreat: Topic::Rfid,
        options: FILES_OPTIONS,
    },
    MenuEntry {
        topic: Topic::Rfid,
        label: "RFID",
        advance: Topic::Files,
        retreat: Topic::Nfc,
        options: RFID_OPTIONS,
    },
    MenuEntry {
        topic: Topic::Nfc,
        label: "NFC",
        advance: Topic::Rfid,
        retreat: Topic::Wifi,
        options: NFC_OPTIONS,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_rows_are_indexed_by_topic() {
        for (index, entry) in MENU_TABLE.iter().enumerate() {
            assert_eq!(entry.topic.index(), index);
            assert_eq!(Topic::from_index(index), Some(entry.topic));
        }
    }

    #[test]
    fn advance_and_retreat_are_inverse() {
        for topic in Topic::ALL {
            assert_eq!(topic.entry().advance.entry().retreat, topic);
            assert_eq!(topic.entry().retreat.entry().advance, topic);
        }
    }

    #[test]
    fn retreat_follows_ring_order() {
        for topic in Topic::ALL {
            let expected = (topic.index() + 1) % Topic::COUNT;
            assert_eq!(topic.entry().retreat.index(), expected);
        }
    }

    #[test]
    fn every_list_starts_with_back_row() {
        for topic in Topic::ALL {
            assert_eq!(topic.options().first(), Some(&BACK_OPTION));
        }
    }

    #[test]
    fn tool_rows_sit_at_their_fixed_indices() {
        assert_eq!(Topic::Ir.options()[1], "B-Gone");
        assert_eq!(Topic::Ir.options()[4], "Read");
        assert_eq!(Topic::Extras.options()[1], "Stopwatch");
    }
}
