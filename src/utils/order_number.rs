use uuid::Uuid;

pub const ORDER_NUMBER_MAX_LEN: usize = 50;

/// Generates an order number of the form `ORD-XXXXXXXXXXXX`.
pub fn generate_order_number() -> String {
    let hex = Uuid::new_v4().simple().to_string().to_ascii_uppercase();
    format!("ORD-{}", &hex[..12])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_order_number_format() {
        let number = generate_order_number();
        assert_eq!(number.len(), 16);
        assert!(number.starts_with("ORD-"));
        assert!(
            number[4..]
                .chars()
                .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase())
        );
    }

    #[test]
    fn test_generate_order_number_differs() {
        assert_ne!(generate_order_number(), generate_order_number());
    }
}
