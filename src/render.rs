use crate::error::Result;
use crate::search::ProductMatch;
use termcolor::{Color, ColorSpec, WriteColor};

/// Number of features shown per product
const DISPLAY_FEATURES: usize = 3;

/// Currency label printed after prices
const CURRENCY: &str = "تومان";

/// Formats a price with `,` between every group of three digits
pub fn format_price(price: u64) -> String {
    let digits = price.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Writes a numbered product list with colors and styling
pub fn render_products<W: WriteColor>(out: &mut W, products: &[ProductMatch]) -> Result<()> {
    if products.is_empty() {
        writeln!(out, "No products found")?;
        return Ok(());
    }

    for (index, item) in products.iter().enumerate() {
        let product = &item.product;

        out.set_color(ColorSpec::new().set_bold(true))?;
        write!(out, "{}. {}", index + 1, product.title)?;
        out.reset()?;
        writeln!(out)?;

        out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        write!(out, "   {} {}", format_price(product.price), CURRENCY)?;
        out.reset()?;
        writeln!(out)?;

        if item.is_close_match {
            out.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
            write!(
                out,
                "   ~ {}",
                item.match_reason.as_deref().unwrap_or("close match")
            )?;
            out.reset()?;
            writeln!(out)?;
        }

        for feature in product.features.iter().take(DISPLAY_FEATURES) {
            writeln!(out, "   - {}", feature)?;
        }

        out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)))?;
        write!(out, "   {}", product.link)?;
        out.reset()?;
        writeln!(out)?;
        writeln!(out)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::product;
    use termcolor::Buffer;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(0), "0");
        assert_eq!(format_price(999), "999");
        assert_eq!(format_price(1_000), "1,000");
        assert_eq!(format_price(120_000), "120,000");
        assert_eq!(format_price(1_500_000), "1,500,000");
    }

    #[test]
    fn test_render_products() {
        let mut helmet = product("Helmet A", "helmet", 1_500_000);
        helmet.features = vec!["a".into(), "b".into(), "c".into(), "d".into()];
        let products = vec![
            ProductMatch::strict(helmet),
            ProductMatch::close(product("Helmet B", "helmet", 3_000_000), "near budget"),
        ];

        let mut buffer = Buffer::no_color();
        render_products(&mut buffer, &products).unwrap();
        let text = String::from_utf8(buffer.into_inner()).unwrap();

        assert!(text.contains("1. Helmet A"));
        assert!(text.contains("1,500,000 تومان"));
        assert!(text.contains("   - c"));
        assert!(!text.contains("   - d"));
        assert!(text.contains("2. Helmet B"));
        assert!(text.contains("~ near budget"));
        assert_eq!(text.matches("~ ").count(), 1);
    }

    #[test]
    fn test_render_empty() {
        let mut buffer = Buffer::no_color();
        render_products(&mut buffer, &[]).unwrap();
        assert_eq!(String::from_utf8(buffer.into_inner()).unwrap(), "No products found\n");
    }
}
