use dnl_core::store::LineId;

/// Champ de saisie actuellement focalisé.
///
/// Le multiplicateur apparaît sur les deux lignes : deux positions de focus,
/// un seul champ dans le store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Focus {
    Title,
    Label(LineId),
    Base(LineId),
    Multiplier(LineId),
}

impl Focus {
    /// Ordre de tabulation.
    pub const ORDER: [Self; 7] = [
        Self::Title,
        Self::Label(LineId::First),
        Self::Base(LineId::First),
        Self::Multiplier(LineId::First),
        Self::Label(LineId::Second),
        Self::Base(LineId::Second),
        Self::Multiplier(LineId::Second),
    ];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|&f| f == self).unwrap_or(0)
    }

    /// Champ suivant (Tab), boucle en fin de liste.
    ///
    /// # Example
    /// ```
    /// use dnl_render::widgets::Focus;
    /// assert_eq!(Focus::ORDER[6].next(), Focus::Title);
    /// ```
    #[must_use]
    pub fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    /// Champ précédent (Shift-Tab).
    #[must_use]
    pub fn prev(self) -> Self {
        let len = Self::ORDER.len();
        Self::ORDER[(self.position() + len - 1) % len]
    }
}

impl Default for Focus {
    fn default() -> Self {
        Self::Base(LineId::First)
    }
}
