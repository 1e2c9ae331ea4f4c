use crate::axis::{AxisState, FrequencyAxis};
use crate::error::ExportError;
use crate::trace::{Trace, TraceId, TraceSource};
use ndarray::prelude::*;
use tracing::{debug, warn};

pub const MIN_PORTS: usize = 1;
pub const MAX_PORTS: usize = 4;

/// N×N selection of traces, one optional trace per S-parameter.
///
/// Diagonal cells only take reflection traces and off-diagonal cells only
/// take through traces. Cells hold [`TraceId`]s; the traces themselves stay
/// with their [`TraceSource`].
#[derive(Clone, Debug, PartialEq)]
pub struct PortMatrix {
    cells: Array2<Option<TraceId>>,
    axis: AxisState,
}

impl PortMatrix {
    pub fn new(ports: usize) -> Result<Self, ExportError> {
        check_ports(ports)?;
        Ok(PortMatrix {
            cells: Array2::from_elem((ports, ports), None),
            axis: AxisState::Open,
        })
    }

    /// Rebuild as an empty `ports`×`ports` matrix. Nothing changes on error.
    pub fn resize(&mut self, ports: usize) -> Result<(), ExportError> {
        check_ports(ports)?;
        self.cells = Array2::from_elem((ports, ports), None);
        self.axis = AxisState::Open;
        debug!(ports, "selection matrix resized");
        Ok(())
    }

    pub fn set_port_count(&mut self, ports: usize) -> Result<(), ExportError> {
        self.resize(ports)
    }

    pub fn ports(&self) -> usize {
        self.cells.nrows()
    }

    pub fn cells(&self) -> ArrayView2<'_, Option<TraceId>> {
        self.cells.view()
    }

    pub fn cell(&self, row: usize, col: usize) -> Result<Option<TraceId>, ExportError> {
        self.check_range(row, col)?;
        Ok(self.cells[[row, col]])
    }

    pub fn axis_state(&self) -> &AxisState {
        &self.axis
    }

    pub fn axis(&self) -> Option<&FrequencyAxis> {
        self.axis.axis()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    /// At least one trace is selected, so there is an axis to export against
    pub fn can_export(&self) -> bool {
        self.axis.is_locked()
    }

    /// "S11", "S21", ...
    pub fn label(&self, row: usize, col: usize) -> String {
        format!("S{}{}", row + 1, col + 1)
    }

    /// Select `trace` for cell (`row`, `col`), or clear it with `None`.
    pub fn set_cell(
        &mut self,
        row: usize,
        col: usize,
        trace: Option<&Trace>,
    ) -> Result<(), ExportError> {
        self.check_range(row, col)?;
        if let Some(t) = trace {
            if t.is_reflection() != (row == col) {
                return Err(ExportError::RoleMismatch {
                    row,
                    col,
                    reflection: t.is_reflection(),
                });
            }
            self.axis.check(t)?;
        }

        self.cells[[row, col]] = trace.map(Trace::id);
        debug!(
            cell = %self.label(row, col),
            trace = trace.map(Trace::name),
            "cell updated"
        );
        let all_empty = self.is_empty();
        self.axis.transition(trace, all_empty);
        Ok(())
    }

    /// Select the trace measured from `port_from` into `port_to`. It lands in
    /// S(`port_to`, `port_from`).
    pub fn set_trace(
        &mut self,
        port_from: usize,
        port_to: usize,
        trace: Option<&Trace>,
    ) -> Result<(), ExportError> {
        self.set_cell(port_to, port_from, trace)
    }

    /// Traces whose role fits the cell, in input order.
    pub fn candidates_for<'a, I>(
        &self,
        row: usize,
        col: usize,
        available: I,
    ) -> Result<Vec<&'a Trace>, ExportError>
    where
        I: IntoIterator<Item = &'a Trace>,
    {
        self.check_range(row, col)?;
        Ok(available
            .into_iter()
            .filter(|t| t.is_reflection() == (row == col))
            .collect())
    }

    /// Candidates that also sit on the locked frequency axis.
    pub fn eligible_for<'a, I>(
        &self,
        row: usize,
        col: usize,
        available: I,
    ) -> Result<Vec<&'a Trace>, ExportError>
    where
        I: IntoIterator<Item = &'a Trace>,
    {
        let candidates = self.candidates_for(row, col, available)?;
        Ok(self.axis.filter(candidates))
    }

    /// Clear every cell whose trace has disappeared from `source`.
    /// Returns the number of cleared cells.
    pub fn retain_available<S>(&mut self, source: &S) -> usize
    where
        S: TraceSource + ?Sized,
    {
        let mut cleared = 0;
        for ((row, col), cell) in self.cells.indexed_iter_mut() {
            if let Some(id) = *cell {
                if source.trace(id).is_none() {
                    let label = format!("S{}{}", row + 1, col + 1);
                    warn!(cell = %label, %id, "selected trace removed");
                    *cell = None;
                    cleared += 1;
                }
            }
        }
        if cleared > 0 {
            let all_empty = self.is_empty();
            self.axis.transition(None, all_empty);
        }
        cleared
    }

    fn check_range(&self, row: usize, col: usize) -> Result<(), ExportError> {
        let ports = self.ports();
        if row >= ports || col >= ports {
            return Err(ExportError::OutOfRange { row, col, ports });
        }
        Ok(())
    }
}

fn check_ports(ports: usize) -> Result<(), ExportError> {
    if !(MIN_PORTS..=MAX_PORTS).contains(&ports) {
        return Err(ExportError::InvalidPortCount(ports));
    }
    Ok(())
}

#[cfg(test)]
mod matrix_tests {
    use super::*;
    use crate::trace::{Sample, TraceSet};
    use num::complex::c64;

    fn sweep(points: usize, start: f64) -> Vec<Sample> {
        (0..points)
            .map(|i| Sample::new(start + i as f64 * 1e9, c64(i as f64, 0.0)))
            .collect()
    }

    fn traces() -> TraceSet {
        let mut set = TraceSet::new();
        set.add("S11", true, sweep(3, 1e9));
        set.add("S21", false, sweep(3, 1e9));
        set.add("S22", true, sweep(3, 1e9));
        set.add("S11 wide", true, sweep(5, 1e9));
        set.add("S12 shifted", false, sweep(3, 2e9));
        set
    }

    #[test]
    fn test_resize() {
        for ports in MIN_PORTS..=MAX_PORTS {
            let mut matrix = PortMatrix::new(1).unwrap();
            matrix.resize(ports).unwrap();
            assert_eq!(matrix.ports(), ports);
            assert_eq!(matrix.cells().dim(), (ports, ports));
            assert!(matrix.cells().iter().all(Option::is_none));
            assert_eq!(matrix.axis_state(), &AxisState::Open);
        }
    }

    #[test]
    fn test_invalid_port_count() {
        assert_eq!(PortMatrix::new(0), Err(ExportError::InvalidPortCount(0)));
        assert_eq!(PortMatrix::new(5), Err(ExportError::InvalidPortCount(5)));

        let set = traces();
        let mut matrix = PortMatrix::new(2).unwrap();
        matrix.set_cell(0, 0, set.by_name("S11")).unwrap();
        assert_eq!(matrix.resize(5), Err(ExportError::InvalidPortCount(5)));
        // Rejected before any mutation
        assert_eq!(matrix.ports(), 2);
        assert!(matrix.cell(0, 0).unwrap().is_some());
        assert!(matrix.can_export());
    }

    #[test]
    fn test_resize_clears_lock() {
        let set = traces();
        let mut matrix = PortMatrix::new(2).unwrap();
        matrix.set_cell(0, 0, set.by_name("S11")).unwrap();
        matrix.set_port_count(3).unwrap();
        assert!(matrix.is_empty());
        assert!(!matrix.can_export());
    }

    #[test]
    fn test_out_of_range() {
        let set = traces();
        let mut matrix = PortMatrix::new(2).unwrap();
        assert_eq!(
            matrix.set_cell(2, 0, set.by_name("S21")),
            Err(ExportError::OutOfRange {
                row: 2,
                col: 0,
                ports: 2
            })
        );
        assert!(matrix.cell(0, 2).is_err());
        assert!(matrix.candidates_for(0, 5, set.available_traces()).is_err());
    }

    #[test]
    fn test_role_mismatch() {
        let set = traces();
        let mut matrix = PortMatrix::new(2).unwrap();
        for t in set.available_traces() {
            for row in 0..2 {
                for col in 0..2 {
                    let result = matrix.set_cell(row, col, Some(t));
                    if t.is_reflection() != (row == col) {
                        assert_eq!(
                            result,
                            Err(ExportError::RoleMismatch {
                                row,
                                col,
                                reflection: t.is_reflection()
                            })
                        );
                    }
                    matrix.resize(2).unwrap();
                }
            }
        }
    }

    #[test]
    fn test_single_port_reflection_only() {
        let set = traces();
        let mut matrix = PortMatrix::new(1).unwrap();
        assert!(matches!(
            matrix.set_cell(0, 0, set.by_name("S21")),
            Err(ExportError::RoleMismatch { .. })
        ));
        assert!(matrix.set_cell(0, 0, set.by_name("S11")).is_ok());
    }

    #[test]
    fn test_candidates_for() {
        let set = traces();
        let matrix = PortMatrix::new(2).unwrap();

        let names = |v: Vec<&Trace>| v.iter().map(|t| t.name().to_string()).collect::<Vec<_>>();

        let diag = matrix.candidates_for(1, 1, set.available_traces()).unwrap();
        assert_eq!(names(diag), vec!["S11", "S22", "S11 wide"]);

        let off = matrix.candidates_for(0, 1, set.available_traces()).unwrap();
        assert_eq!(names(off), vec!["S21", "S12 shifted"]);
    }

    #[test]
    fn test_first_selection_locks_axis() {
        let set = traces();
        let mut matrix = PortMatrix::new(2).unwrap();
        assert!(!matrix.can_export());

        matrix.set_cell(0, 0, set.by_name("S11")).unwrap();
        assert_eq!(matrix.axis(), Some(&FrequencyAxis::new(3, 1e9, 3e9)));

        let diag: Vec<&str> = matrix
            .eligible_for(1, 1, set.available_traces())
            .unwrap()
            .iter()
            .map(|t| t.name())
            .collect();
        assert_eq!(diag, vec!["S11", "S22"]);

        let off: Vec<&str> = matrix
            .eligible_for(1, 0, set.available_traces())
            .unwrap()
            .iter()
            .map(|t| t.name())
            .collect();
        assert_eq!(off, vec!["S21"]);
    }

    #[test]
    fn test_incompatible_selection_rejected() {
        let set = traces();
        let mut matrix = PortMatrix::new(2).unwrap();
        matrix.set_cell(0, 0, set.by_name("S11")).unwrap();

        let result = matrix.set_cell(1, 1, set.by_name("S11 wide"));
        assert!(matches!(
            result,
            Err(ExportError::IncompatibleFrequencyAxis { .. })
        ));
        assert_eq!(matrix.cell(1, 1).unwrap(), None);
    }

    #[test]
    fn test_clearing_all_cells_reopens_axis() {
        let set = traces();
        let mut matrix = PortMatrix::new(2).unwrap();
        matrix.set_cell(0, 0, set.by_name("S11")).unwrap();
        matrix.set_cell(1, 0, set.by_name("S21")).unwrap();

        matrix.set_cell(0, 0, None).unwrap();
        assert!(matrix.can_export());

        matrix.set_cell(1, 0, None).unwrap();
        assert_eq!(matrix.axis_state(), &AxisState::Open);

        // A new axis may now be established
        matrix.set_cell(1, 1, set.by_name("S11 wide")).unwrap();
        assert_eq!(matrix.axis(), Some(&FrequencyAxis::new(5, 1e9, 5e9)));
    }

    #[test]
    fn test_set_trace() {
        let set = traces();
        let mut matrix = PortMatrix::new(2).unwrap();
        let s21 = set.by_name("S21").unwrap();
        matrix.set_trace(0, 1, Some(s21)).unwrap();
        assert_eq!(matrix.cell(1, 0).unwrap(), Some(s21.id()));
        assert_eq!(matrix.cell(0, 1).unwrap(), None);
        assert_eq!(matrix.label(1, 0), "S21");
    }

    #[test]
    fn test_retain_available() {
        let mut set = traces();
        let mut matrix = PortMatrix::new(2).unwrap();
        let s11 = set.by_name("S11").unwrap().id();
        let s21 = set.by_name("S21").unwrap().id();
        matrix.set_cell(0, 0, set.trace(s11)).unwrap();
        matrix.set_cell(1, 0, set.trace(s21)).unwrap();

        assert_eq!(matrix.retain_available(&set), 0);

        set.remove(s11);
        assert_eq!(matrix.retain_available(&set), 1);
        assert_eq!(matrix.cell(0, 0).unwrap(), None);
        assert!(matrix.can_export());

        set.remove(s21);
        assert_eq!(matrix.retain_available(&set), 1);
        assert!(!matrix.can_export());
    }
}
