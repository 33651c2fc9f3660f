//! Selector façade
//!
//! Parses a query once, evaluates it against the caller's elements and
//! returns the selected indices together with the slice they index.

use crate::ast::SelectorExpr;
use crate::config::SelectorConfig;
use crate::element::{AxisFrame, ElementKind, Selectable, Vec3};
use crate::error::{ConfigError, SelectorResult};
use crate::eval::{mask_of, Evaluator};
use crate::nearest::nearest_to_points;
use crate::parser::parse_selector;

/// Ordered, duplicate-free selection over a caller-owned slice
#[derive(Debug, Clone)]
pub struct Selection<'a, T> {
    elements: &'a [T],
    indices: Vec<usize>,
}

impl<'a, T> Selection<'a, T> {
    fn new(elements: &'a [T], indices: Vec<usize>) -> Self {
        let mut seen = vec![false; elements.len()];
        let indices = indices
            .into_iter()
            .filter(|&i| !std::mem::replace(&mut seen[i], true))
            .collect();
        Self { elements, indices }
    }

    /// Selected indices into the caller's slice
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Consume the selection, keeping only the indices
    pub fn into_indices(self) -> Vec<usize> {
        self.indices
    }

    /// Number of selected elements
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Check if nothing was selected
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Iterate over the selected elements in selection order
    pub fn iter(&self) -> impl Iterator<Item = &'a T> + '_ {
        let elements = self.elements;
        self.indices.iter().map(move |&i| &elements[i])
    }

    /// Check if the element at `index` was selected
    pub fn contains(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }

    /// Membership mask over the whole slice
    pub fn mask(&self) -> Vec<bool> {
        mask_of(&self.indices, self.elements.len())
    }
}

/// Query evaluator bound to a tolerance configuration and an axis frame
#[derive(Debug, Clone, Default)]
pub struct Selector {
    config: SelectorConfig,
    frame: AxisFrame,
}

impl Selector {
    /// Create a selector with default tolerances and the global frame
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different tolerance configuration.
    ///
    /// The configuration is validated here, so a selector never evaluates
    /// with negative, non-finite or overlapping tolerances.
    pub fn with_config(mut self, config: SelectorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    /// Evaluate axis letters against a local frame
    pub fn with_frame(mut self, frame: AxisFrame) -> Self {
        self.frame = frame;
        self
    }

    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    pub fn frame(&self) -> &AxisFrame {
        &self.frame
    }

    /// Parse `query` and select from `elements`
    pub fn select<'a, T: Selectable>(
        &self,
        query: &str,
        elements: &'a [T],
    ) -> SelectorResult<Selection<'a, T>> {
        let expr = parse_selector(query)?;
        let selection = self.select_expr(&expr, elements)?;
        tracing::debug!(
            query,
            elements = elements.len(),
            selected = selection.len(),
            "selector evaluated"
        );
        Ok(selection)
    }

    /// Select with an already parsed expression
    pub fn select_expr<'a, T: Selectable>(
        &self,
        expr: &SelectorExpr,
        elements: &'a [T],
    ) -> SelectorResult<Selection<'a, T>> {
        let indices = Evaluator::new(elements, &self.frame, &self.config).evaluate(expr)?;
        Ok(Selection::new(elements, indices))
    }

    /// Select among the elements of one kind only.
    ///
    /// Tie groups and complements are computed within that kind; the
    /// returned indices still refer to the full slice.
    pub fn select_kind<'a, T: Selectable>(
        &self,
        query: &str,
        elements: &'a [T],
        kind: ElementKind,
    ) -> SelectorResult<Selection<'a, T>> {
        let expr = parse_selector(query)?;
        let subset: Vec<usize> = elements
            .iter()
            .enumerate()
            .filter(|(_, e)| e.kind() == kind)
            .map(|(i, _)| i)
            .collect();
        let view: Vec<&T> = subset.iter().map(|&i| &elements[i]).collect();

        let local = Evaluator::new(&view, &self.frame, &self.config).evaluate(&expr)?;
        let indices: Vec<usize> = local.into_iter().map(|j| subset[j]).collect();

        tracing::debug!(
            query,
            kind = kind.as_str(),
            candidates = subset.len(),
            selected = indices.len(),
            "selector evaluated"
        );
        Ok(Selection::new(elements, indices))
    }

    /// Select the element nearest to each reference point
    pub fn select_nearest<'a, T: Selectable>(
        &self,
        elements: &'a [T],
        points: &[Vec3],
    ) -> Selection<'a, T> {
        Selection::new(elements, nearest_to_points(elements, points))
    }
}

/// Select from `elements` with default tolerances and the global frame
pub fn select<'a, T: Selectable>(
    query: &str,
    elements: &'a [T],
) -> SelectorResult<Selection<'a, T>> {
    Selector::new().select(query, elements)
}
