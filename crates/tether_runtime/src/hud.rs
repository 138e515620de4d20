//! HUD text

use crate::loadout::Loadout;
use tether_core::KillTally;

/// Lines shown on the HUD
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudText {
    /// `"Enemies: {kills}/{goal}"`
    pub enemies: String,
    /// `"{ammo} / {capacity}"` of the drawn weapon, hidden while holstered
    pub ammo: Option<String>,
}

impl HudText {
    /// Format the HUD for the current tally and loadout
    pub fn new(tally: &KillTally, loadout: &Loadout) -> Self {
        Self {
            enemies: format!("Enemies: {}/{}", tally.kills, tally.goal),
            ammo: loadout
                .active()
                .map(|weapon| format!("{} / {}", weapon.ammo(), weapon.capacity())),
        }
    }
}

/// Receives HUD text once per frame
pub trait HudSink {
    fn present(&mut self, hud: &HudText);
}

impl HudSink for Vec<HudText> {
    fn present(&mut self, hud: &HudText) {
        self.push(hud.clone());
    }
}

/// Keeps only the latest HUD
impl HudSink for Option<HudText> {
    fn present(&mut self, hud: &HudText) {
        *self = Some(hud.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loadout::Slot;
    use tether_core::KillCounter;

    #[test]
    fn test_format() {
        let mut tally = KillTally::default();
        tally.record_kill();
        let mut loadout = Loadout::default();
        loadout.select(Slot::Pistol);

        let hud = HudText::new(&tally, &loadout);
        assert_eq!(hud.enemies, "Enemies: 1/10");
        assert_eq!(hud.ammo.as_deref(), Some("15 / 15"));
    }

    #[test]
    fn test_holstered_hides_ammo() {
        let mut loadout = Loadout::default();
        loadout.select(Slot::Holster);
        let hud = HudText::new(&KillTally::default(), &loadout);
        assert_eq!(hud.ammo, None);
    }
}
