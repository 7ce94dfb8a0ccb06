use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};

use crate::domain::cart::add_line;
use crate::domain::errors::DomainError;
use crate::domain::inventory::debit;
use crate::domain::order::{calculate_order, Order};
use crate::domain::ports::RecordStore;
use crate::domain::product::{parse_inventory, CartLine, Product};

use super::records::Records;

pub struct StorefrontService<D, S> {
    records: Records<D, S>,
    // Held for every read-modify-write of a record.
    turn: Mutex<()>,
}

impl<D: RecordStore, S: RecordStore> StorefrontService<D, S> {
    pub fn new(durable: D, session: S) -> Self {
        Self {
            records: Records::new(durable, session),
            turn: Mutex::new(()),
        }
    }

    fn turn(&self) -> Result<MutexGuard<'_, ()>, DomainError> {
        self.turn
            .lock()
            .map_err(|_| DomainError::Internal("storefront lock poisoned".to_string()))
    }

    pub fn inventory(&self) -> Result<Option<Vec<Product>>, DomainError> {
        self.records.inventory()
    }

    /// Parse `document` and store it as the new inventory, replacing the old
    /// one entirely.
    pub fn replace_inventory(&self, document: &str) -> Result<Vec<Product>, DomainError> {
        let inventory = parse_inventory(document)?;
        let _turn = self.turn()?;
        self.records.set_inventory(&inventory)?;
        log::info!("Inventory replaced with {} products", inventory.len());
        Ok(inventory)
    }

    pub fn load_inventory_from_upload(&self, content: Vec<u8>) -> Result<Vec<Product>, DomainError> {
        let document = String::from_utf8(content)?;
        self.replace_inventory(&document)
    }

    pub fn cart(&self) -> Result<Vec<CartLine>, DomainError> {
        self.records.cart()
    }

    /// Add `quantity` (default 1) of the product at `index` and return the
    /// updated cart. The index is not checked against the inventory here.
    pub fn add_to_cart(
        &self,
        index: usize,
        quantity: Option<u32>,
    ) -> Result<Vec<CartLine>, DomainError> {
        let _turn = self.turn()?;
        let mut cart = self.records.cart()?;
        add_line(&mut cart, index, quantity.unwrap_or(1))?;
        self.records.set_cart(&cart)?;
        Ok(cart)
    }

    pub fn clear_cart(&self) -> Result<(), DomainError> {
        let _turn = self.turn()?;
        self.records.set_cart(&[])
    }

    /// Price the current cart for a delivery `km` away and keep the result as
    /// the session's last order.
    pub fn calculate_totals(&self, km: f64) -> Result<Order, DomainError> {
        self.calculate_totals_at(km, Utc::now())
    }

    pub fn calculate_totals_at(&self, km: f64, now: DateTime<Utc>) -> Result<Order, DomainError> {
        let _turn = self.turn()?;
        let inventory = self.records.inventory()?.unwrap_or_default();
        let cart = self.records.cart()?;
        let order = calculate_order(&inventory, &cart, km, now)?;
        self.records.set_last_order(&order)?;
        Ok(order)
    }

    pub fn last_order(&self) -> Result<Option<Order>, DomainError> {
        self.records.last_order()
    }

    /// Take the current cart out of stock. The cart itself is left as is.
    pub fn debit_inventory(&self) -> Result<Vec<Product>, DomainError> {
        let _turn = self.turn()?;
        let mut inventory = self.records.inventory()?.unwrap_or_default();
        let cart = self.records.cart()?;
        debit(&mut inventory, &cart);
        self.records.set_inventory(&inventory)?;
        Ok(inventory)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;
    use crate::infrastructure::memory_store::MemoryStore;

    const INVENTORY: &str = r#"[{"preco":10,"peso":1,"dias_entrega":3,"quantidade":5}]"#;

    fn service() -> StorefrontService<MemoryStore, MemoryStore> {
        StorefrontService::new(MemoryStore::new(), MemoryStore::new())
    }

    fn stocked_service() -> StorefrontService<MemoryStore, MemoryStore> {
        let service = service();
        service.replace_inventory(INVENTORY).expect("inventory");
        service
    }

    #[test]
    fn failed_replace_keeps_previous_inventory() {
        let service = stocked_service();

        let err = service.replace_inventory(r#"{"preco":1}"#).unwrap_err();

        assert!(matches!(err, DomainError::InventoryParse(_)));
        assert_eq!(service.inventory().unwrap().map(|i| i.len()), Some(1));
    }

    #[test]
    fn upload_parse_error_is_reported() {
        let service = stocked_service();

        let err = service
            .load_inventory_from_upload(b"[{\"preco\":".to_vec())
            .unwrap_err();

        assert!(matches!(err, DomainError::InventoryParse(_)));
        assert_eq!(service.inventory().unwrap().map(|i| i.len()), Some(1));
    }

    #[test]
    fn upload_rejects_invalid_utf8() {
        let err = service()
            .load_inventory_from_upload(vec![0xff, 0xfe, 0x5b])
            .unwrap_err();
        assert!(matches!(err, DomainError::UploadRead(_)));
    }

    #[test]
    fn upload_replaces_inventory() {
        let service = stocked_service();
        let loaded = service
            .load_inventory_from_upload(br#"[{"preco":7,"peso":3,"dias_entrega":9,"quantidade":1}]"#.to_vec())
            .expect("upload");

        assert_eq!(loaded, vec![Product::new(7.0, 3.0, 9, 1)]);
        assert_eq!(service.inventory().unwrap(), Some(loaded));
    }

    #[test]
    fn add_defaults_to_one_and_merges() {
        let service = service();
        service.add_to_cart(0, None).unwrap();
        let cart = service.add_to_cart(0, Some(3)).unwrap();

        assert_eq!(
            cart,
            vec![CartLine {
                index: 0,
                quantity: 4
            }]
        );
        assert_eq!(service.cart().unwrap(), cart);
    }

    #[test]
    fn clearing_is_idempotent() {
        let service = service();
        service.add_to_cart(2, Some(1)).unwrap();

        service.clear_cart().unwrap();
        service.clear_cart().unwrap();

        assert_eq!(service.cart().unwrap(), vec![]);
    }

    #[test]
    fn checkout_scenario_is_persisted_as_last_order() {
        let service = stocked_service();
        service.add_to_cart(0, Some(2)).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();

        let order = service.calculate_totals_at(5.0, now).unwrap();

        assert_eq!(order.subtotal, 20.0);
        assert_eq!(order.freight, 0.0);
        assert_eq!(order.tax, 5.0);
        assert_eq!(order.total, 25.0);
        assert_eq!(order.max_lead_time_days, 3);
        assert_eq!(order.delivery_at, now + Duration::days(3));
        assert_eq!(service.last_order().unwrap(), Some(order));
    }

    #[test]
    fn later_checkout_overwrites_last_order() {
        let service = stocked_service();
        service.add_to_cart(0, Some(2)).unwrap();

        service.calculate_totals(5.0).unwrap();
        let second = service.calculate_totals(50.0).unwrap();

        assert_eq!(second.freight, 60.0);
        assert_eq!(second.total, 85.0);
        assert_eq!(service.last_order().unwrap(), Some(second));
    }

    #[test]
    fn checkout_without_inventory_fails_on_first_line() {
        let service = service();
        service.add_to_cart(0, Some(1)).unwrap();

        let err = service.calculate_totals(0.0).unwrap_err();

        assert!(matches!(err, DomainError::MissingProduct { index: 0 }));
        assert_eq!(service.last_order().unwrap(), None);
    }

    #[test]
    fn debit_takes_cart_out_of_stock_and_keeps_cart() {
        let service = stocked_service();
        service.add_to_cart(0, Some(2)).unwrap();
        service.add_to_cart(9, Some(1)).unwrap();

        let inventory = service.debit_inventory().unwrap();

        assert_eq!(inventory[0].quantity, 3);
        assert_eq!(service.inventory().unwrap(), Some(inventory));
        assert_eq!(service.cart().unwrap().len(), 2);
    }

    #[test]
    fn debit_floors_stock_at_zero() {
        let service = stocked_service();
        service.add_to_cart(0, Some(8)).unwrap();

        let inventory = service.debit_inventory().unwrap();

        assert_eq!(inventory[0].quantity, 0);
    }
}
