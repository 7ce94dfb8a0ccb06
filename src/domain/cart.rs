use super::errors::DomainError;
use super::product::CartLine;

/// Add `quantity` units of the product at `index`, merging into an existing
/// line for the same index.
pub fn add_line(cart: &mut Vec<CartLine>, index: usize, quantity: u32) -> Result<(), DomainError> {
    if quantity == 0 {
        return Err(DomainError::InvalidInput(
            "quantity must be at least 1".to_string(),
        ));
    }

    match cart.iter_mut().find(|line| line.index == index) {
        Some(line) => {
            line.quantity = line.quantity.checked_add(quantity).ok_or_else(|| {
                DomainError::InvalidInput(format!("quantity overflow for product {index}"))
            })?;
        }
        None => cart.push(CartLine { index, quantity }),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_new_line() {
        let mut cart = Vec::new();
        add_line(&mut cart, 3, 1).expect("add");
        assert_eq!(
            cart,
            vec![CartLine {
                index: 3,
                quantity: 1
            }]
        );
    }

    #[test]
    fn merges_same_reference_into_one_line() {
        let mut cart = Vec::new();
        add_line(&mut cart, 0, 2).expect("add");
        add_line(&mut cart, 0, 3).expect("add");

        assert_eq!(cart.len(), 1);
        assert_eq!(cart[0].quantity, 5);
    }

    #[test]
    fn keeps_lines_for_different_references_in_insertion_order() {
        let mut cart = Vec::new();
        add_line(&mut cart, 4, 1).expect("add");
        add_line(&mut cart, 1, 2).expect("add");
        add_line(&mut cart, 4, 1).expect("add");

        let indices: Vec<usize> = cart.iter().map(|l| l.index).collect();
        assert_eq!(indices, vec![4, 1]);
        assert_eq!(cart[0].quantity, 2);
    }

    #[test]
    fn rejects_zero_quantity() {
        let mut cart = Vec::new();
        let err = add_line(&mut cart, 0, 0).unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
        assert!(cart.is_empty());
    }

    #[test]
    fn rejects_overflowing_quantity() {
        let mut cart = vec![CartLine {
            index: 0,
            quantity: u32::MAX,
        }];
        assert!(add_line(&mut cart, 0, 1).is_err());
        assert_eq!(cart[0].quantity, u32::MAX);
    }
}
