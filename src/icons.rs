//! Mapping from raw hardware readings to the glyphs shown in the top bar.

/// A pre-rendered glyph the canvas displays as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    BatteryFull,
    Battery3,
    Battery2,
    Battery1,
    BatteryEmpty,
    Connected,
    Disconnected,
}

impl Symbol {
    /// Text handed to the canvas for this symbol.
    ///
    /// Battery glyphs share one width so the icon does not shift when the
    /// level changes.
    pub const fn glyph(self) -> &'static str {
        match self {
            Symbol::BatteryFull => "[####]",
            Symbol::Battery3 => "[### ]",
            Symbol::Battery2 => "[##  ]",
            Symbol::Battery1 => "[#   ]",
            Symbol::BatteryEmpty => "[    ]",
            Symbol::Connected => "(((",
            Symbol::Disconnected => "--",
        }
    }
}

/// Pick the battery glyph for a charge percentage.
///
/// Tiers are exclusive at the lower bound: 80 % still shows three bars.
pub fn render_battery_icon(level: u8) -> Symbol {
    match level {
        81.. => Symbol::BatteryFull,
        61..=80 => Symbol::Battery3,
        41..=60 => Symbol::Battery2,
        21..=40 => Symbol::Battery1,
        _ => Symbol::BatteryEmpty,
    }
}

/// Pick the connection glyph.
///
/// USB power alone counts as connected.
pub fn render_connection_icon(wired_powered: bool, wireless_linked: bool) -> Symbol {
    if wired_powered || wireless_linked {
        Symbol::Connected
    } else {
        Symbol::Disconnected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BATTERY_SYMBOLS: [Symbol; 5] = [
        Symbol::BatteryFull,
        Symbol::Battery3,
        Symbol::Battery2,
        Symbol::Battery1,
        Symbol::BatteryEmpty,
    ];

    #[test]
    fn test_battery_tier_boundaries() {
        assert_eq!(render_battery_icon(100), Symbol::BatteryFull);
        assert_eq!(render_battery_icon(81), Symbol::BatteryFull);
        assert_eq!(render_battery_icon(80), Symbol::Battery3);
        assert_eq!(render_battery_icon(61), Symbol::Battery3);
        assert_eq!(render_battery_icon(60), Symbol::Battery2);
        assert_eq!(render_battery_icon(41), Symbol::Battery2);
        assert_eq!(render_battery_icon(40), Symbol::Battery1);
        assert_eq!(render_battery_icon(21), Symbol::Battery1);
        assert_eq!(render_battery_icon(20), Symbol::BatteryEmpty);
        assert_eq!(render_battery_icon(0), Symbol::BatteryEmpty);
    }

    #[test]
    fn test_battery_icon_is_monotonic() {
        let tier = |s: Symbol| BATTERY_SYMBOLS.iter().position(|b| *b == s).unwrap();

        let mut previous = tier(render_battery_icon(0));
        for level in 1..=100u8 {
            let current = tier(render_battery_icon(level));
            assert!(BATTERY_SYMBOLS.contains(&render_battery_icon(level)));
            assert!(current <= previous, "level {} went down a tier", level);
            previous = current;
        }
    }

    #[test]
    fn test_connection_truth_table() {
        assert_eq!(render_connection_icon(false, false), Symbol::Disconnected);
        assert_eq!(render_connection_icon(true, false), Symbol::Connected);
        assert_eq!(render_connection_icon(false, true), Symbol::Connected);
        assert_eq!(render_connection_icon(true, true), Symbol::Connected);
    }

    #[test]
    fn test_battery_glyphs_share_width() {
        for symbol in BATTERY_SYMBOLS {
            assert_eq!(symbol.glyph().len(), 6);
        }
    }

    #[test]
    fn test_glyphs_are_visible() {
        assert!(!Symbol::Disconnected.glyph().trim().is_empty());
        assert_ne!(Symbol::Connected.glyph(), Symbol::Disconnected.glyph());
    }
}
