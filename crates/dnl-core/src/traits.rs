use crate::store::LineId;

/// Reçoit les commits numériques émis par la couche de présentation.
///
/// Implémenté par : `ValueStore`. Le multiplicateur est unique : les deux
/// lignes appellent la même méthode.
///
/// # Example
/// ```
/// use dnl_core::traits::ValueSink;
/// use dnl_core::store::LineId;
///
/// #[derive(Default)]
/// struct Recorder { calls: Vec<(Option<LineId>, f64)> }
/// impl ValueSink for Recorder {
///     fn on_base_value_change(&mut self, line: LineId, value: f64) {
///         self.calls.push((Some(line), value));
///     }
///     fn on_multiplier_change(&mut self, value: f64) {
///         self.calls.push((None, value));
///     }
/// }
///
/// let mut rec = Recorder::default();
/// rec.on_multiplier_change(4.0);
/// assert_eq!(rec.calls, vec![(None, 4.0)]);
/// ```
pub trait ValueSink {
    /// Nouvelle valeur canonique pour la quantité unitaire d'une ligne.
    fn on_base_value_change(&mut self, line: LineId, value: f64);

    /// Nouvelle valeur canonique pour le multiplicateur partagé.
    fn on_multiplier_change(&mut self, value: f64);
}
