use crate::catalog::Product;

/// Number of related listings shown on a product page.
pub const DEFAULT_RELATED_LIMIT: usize = 4;

/// Other listings in the same category as `current`, in input order.
///
/// A product without a category has no related products.
pub fn related_products<'a>(
    products: &'a [Product],
    current: &Product,
    limit: usize,
) -> Vec<&'a Product> {
    let Some(category) = &current.category else {
        return Vec::new();
    };

    products
        .iter()
        .filter(|p| p.id != current.id && p.category.as_ref() == Some(category))
        .take(limit)
        .collect()
}
