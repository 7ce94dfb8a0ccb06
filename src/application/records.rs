use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::errors::DomainError;
use crate::domain::order::Order;
use crate::domain::ports::RecordStore;
use crate::domain::product::{CartLine, Product};

pub const INVENTORY_KEY: &str = "estoqueAtual";
pub const CART_KEY: &str = "carrinho";
pub const LAST_ORDER_KEY: &str = "ultimaCompra";

/// Typed access to the three storefront records.
///
/// Inventory and cart live in the durable store, the last order in the
/// session store. A record that is missing or cannot be parsed reads as its
/// empty value; only failures of the store itself are returned as errors.
pub struct Records<D, S> {
    durable: D,
    session: S,
}

impl<D: RecordStore, S: RecordStore> Records<D, S> {
    pub fn new(durable: D, session: S) -> Self {
        Self { durable, session }
    }

    pub fn inventory(&self) -> Result<Option<Vec<Product>>, DomainError> {
        read_json(&self.durable, INVENTORY_KEY)
    }

    pub fn set_inventory(&self, inventory: &[Product]) -> Result<(), DomainError> {
        write_json(&self.durable, INVENTORY_KEY, &inventory)
    }

    pub fn cart(&self) -> Result<Vec<CartLine>, DomainError> {
        Ok(read_json(&self.durable, CART_KEY)?.unwrap_or_default())
    }

    pub fn set_cart(&self, cart: &[CartLine]) -> Result<(), DomainError> {
        write_json(&self.durable, CART_KEY, &cart)
    }

    pub fn last_order(&self) -> Result<Option<Order>, DomainError> {
        read_json(&self.session, LAST_ORDER_KEY)
    }

    pub fn set_last_order(&self, order: &Order) -> Result<(), DomainError> {
        write_json(&self.session, LAST_ORDER_KEY, order)
    }
}

fn read_json<T: DeserializeOwned>(
    store: &impl RecordStore,
    key: &str,
) -> Result<Option<T>, DomainError> {
    let raw = match store.get(key)? {
        Some(raw) if !raw.is_empty() => raw,
        _ => return Ok(None),
    };

    match serde_json::from_str::<Option<T>>(&raw) {
        Ok(value) => Ok(value),
        Err(e) => {
            log::error!("Ignoring malformed '{}' record: {}", key, e);
            Ok(None)
        }
    }
}

fn write_json<T: Serialize + ?Sized>(
    store: &impl RecordStore,
    key: &str,
    value: &T,
) -> Result<(), DomainError> {
    let text = serde_json::to_string(value)
        .map_err(|e| DomainError::Internal(format!("cannot serialize '{key}': {e}")))?;
    store.set(key, &text)
}
