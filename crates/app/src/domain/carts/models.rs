//! Cart Models

use crate::{domain::products::models::ProductUuid, uuids::TypedUuid};

/// Cart UUID, used by callers that keep carts per session.
pub type CartUuid = TypedUuid<Cart>;

/// Cart Model
///
/// A cart lives only as long as the session that owns it. Lines keep the
/// order in which products were first added and hold at most one line per
/// product.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

/// Cart Line Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub product: ProductUuid,

    /// Product name when the line was created.
    pub name: String,

    /// Product price when the line was created.
    pub unit_price: u64,

    pub quantity: u32,
    pub subtotal: u64,
}

impl CartLine {
    pub(crate) fn new(
        product: ProductUuid,
        name: String,
        unit_price: u64,
        quantity: u32,
    ) -> Option<Self> {
        let subtotal = line_subtotal(unit_price, quantity)?;

        Some(Self {
            product,
            name,
            unit_price,
            quantity,
            subtotal,
        })
    }

    /// Replace the quantity, recomputing the subtotal from the snapshotted price.
    pub(crate) fn set_quantity(&mut self, quantity: u32) -> Option<()> {
        self.subtotal = line_subtotal(self.unit_price, quantity)?;
        self.quantity = quantity;

        Some(())
    }
}

impl Cart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Sum of every line subtotal; zero for an empty cart.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.lines
            .iter()
            .fold(0, |total, line| total.saturating_add(line.subtotal))
    }

    /// Remove the line at `index`, returning it.
    #[must_use]
    pub fn remove_item(&mut self, index: usize) -> Option<CartLine> {
        (index < self.lines.len()).then(|| self.lines.remove(index))
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub(crate) fn line_mut(&mut self, index: usize) -> Option<&mut CartLine> {
        self.lines.get_mut(index)
    }

    pub(crate) fn line_for_mut(&mut self, product: ProductUuid) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.product == product)
    }

    pub(crate) fn push(&mut self, line: CartLine) {
        self.lines.push(line);
    }
}

fn line_subtotal(unit_price: u64, quantity: u32) -> Option<u64> {
    unit_price.checked_mul(u64::from(quantity))
}
