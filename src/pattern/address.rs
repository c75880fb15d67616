// Mon Oct 19 2026 - Alex

/// `0x` followed by two lowercase hex digits per byte, nothing trimmed.
pub fn format_address(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_address() {
        let formatted = format_address(&[0u8; 20]);
        assert_eq!(formatted, format!("0x{}", "0".repeat(40)));
        assert_eq!(formatted.len(), 42);
    }

    #[test]
    fn test_lowercase_no_compression() {
        let mut addr = [0u8; 20];
        addr[0] = 0x0A;
        addr[19] = 0xBC;
        assert_eq!(format_address(&addr), "0x0a000000000000000000000000000000000000bc");
    }
}
