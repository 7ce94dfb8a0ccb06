use super::product::{CartLine, Product};

/// Take purchased quantities out of stock. Stock never goes below zero, and
/// lines pointing past the end of the inventory are ignored.
pub fn debit(inventory: &mut [Product], cart: &[CartLine]) {
    for line in cart {
        match inventory.get_mut(line.index) {
            Some(product) => product.quantity = product.quantity.saturating_sub(line.quantity),
            None => log::debug!(
                "Skipping debit for product {}: not in inventory",
                line.index
            ),
        }
    }
}
