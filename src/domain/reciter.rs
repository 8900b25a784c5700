//! Static table of the recitations offered by the audio endpoint.

/// Recitation used when the configuration does not pick one.
pub const DEFAULT_RECITER_ID: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reciter {
    pub id: u32,
    pub name: &'static str,
    pub style: Option<&'static str>,
}

impl Reciter {
    pub const fn new(id: u32, name: &'static str, style: Option<&'static str>) -> Self {
        Self { id, name, style }
    }

    pub fn display_name(&self) -> String {
        match self.style {
            Some(style) => format!("{} ({})", self.name, style),
            None => self.name.to_string(),
        }
    }
}

pub const RECITERS: &[Reciter] = &[
    Reciter::new(1, "AbdulBaset AbdulSamad", Some("Mujawwad")),
    Reciter::new(2, "AbdulBaset AbdulSamad", Some("Murattal")),
    Reciter::new(3, "Abdur-Rahman as-Sudais", None),
    Reciter::new(4, "Abu Bakr al-Shatri", None),
    Reciter::new(5, "Hani ar-Rifai", None),
    Reciter::new(6, "Mahmoud Khalil Al-Husary", None),
    Reciter::new(7, "Mishari Rashid al-`Afasy", None),
    Reciter::new(8, "Mohamed Siddiq al-Minshawi", Some("Mujawwad")),
    Reciter::new(9, "Mohamed Siddiq al-Minshawi", Some("Murattal")),
    Reciter::new(10, "Sa`ud ash-Shuraym", None),
    Reciter::new(11, "Mohamed al-Tablawi", None),
    Reciter::new(12, "Mahmoud Khalil Al-Husary", Some("Muallim")),
];

/// Read-only set of reciters with a distinguished default.
#[derive(Debug, Clone)]
pub struct ReciterRegistry {
    reciters: &'static [Reciter],
    default_id: u32,
}

impl Default for ReciterRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_RECITER_ID)
    }
}

impl ReciterRegistry {
    pub fn new(default_id: u32) -> Self {
        Self {
            reciters: RECITERS,
            default_id,
        }
    }

    /// Build a registry over a custom table. Returns `None` for an empty table.
    pub fn with_reciters(reciters: &'static [Reciter], default_id: u32) -> Option<Self> {
        if reciters.is_empty() {
            return None;
        }
        Some(Self {
            reciters,
            default_id,
        })
    }

    pub fn all(&self) -> &[Reciter] {
        self.reciters
    }

    pub fn get(&self, id: u32) -> Option<&Reciter> {
        self.reciters.iter().find(|r| r.id == id)
    }

    /// The configured default, or the first entry when that id is unknown.
    pub fn default_reciter(&self) -> &Reciter {
        self.get(self.default_id).unwrap_or(&self.reciters[0])
    }

    /// Reciter following `id` in table order, wrapping around.
    pub fn next_after(&self, id: u32) -> &Reciter {
        match self.position(id) {
            Some(pos) => &self.reciters[(pos + 1) % self.reciters.len()],
            None => self.default_reciter(),
        }
    }

    /// Reciter preceding `id` in table order, wrapping around.
    pub fn prev_before(&self, id: u32) -> &Reciter {
        match self.position(id) {
            Some(0) => &self.reciters[self.reciters.len() - 1],
            Some(pos) => &self.reciters[pos - 1],
            None => self.default_reciter(),
        }
    }

    fn position(&self, id: u32) -> Option<usize> {
        self.reciters.iter().position(|r| r.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHORT: &[Reciter] = &[
        Reciter::new(7, "First", None),
        Reciter::new(9, "Second", Some("Murattal")),
    ];

    #[test]
    fn test_default_reciter_by_id() {
        let registry = ReciterRegistry::default();
        let reciter = registry.default_reciter();
        assert_eq!(reciter.id, 2);
        assert_eq!(reciter.display_name(), "AbdulBaset AbdulSamad (Murattal)");
    }

    #[test]
    fn test_default_reciter_falls_back_to_first() {
        let registry = ReciterRegistry::with_reciters(SHORT, 2).unwrap();
        assert_eq!(registry.default_reciter().id, 7);
    }

    #[test]
    fn test_empty_table_rejected() {
        assert!(ReciterRegistry::with_reciters(&[], 2).is_none());
    }

    #[test]
    fn test_get() {
        let registry = ReciterRegistry::default();
        assert_eq!(registry.get(7).map(|r| r.name), Some("Mishari Rashid al-`Afasy"));
        assert!(registry.get(999).is_none());
    }

    #[test]
    fn test_ids_are_unique() {
        let mut ids: Vec<u32> = RECITERS.iter().map(|r| r.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), RECITERS.len());
    }

    #[test]
    fn test_cycling_wraps() {
        let registry = ReciterRegistry::with_reciters(SHORT, 7).unwrap();
        assert_eq!(registry.next_after(7).id, 9);
        assert_eq!(registry.next_after(9).id, 7);
        assert_eq!(registry.prev_before(7).id, 9);
        assert_eq!(registry.prev_before(9).id, 7);
        // Unknown ids land on the default
        assert_eq!(registry.next_after(100).id, 7);
    }
}
