use crate::catalog::Product;

pub const UNAVAILABLE_MESSAGE: &str = "Lo siento, en este momento el servicio de asistencia con IA \
no está disponible y tampoco pude consultar el catálogo de productos. \
Por favor, inténtalo de nuevo más tarde.";

const SUGGESTION_COUNT: usize = 3;

/// Answer composed locally when the completion provider cannot be used.
///
/// Suggests the first products of the catalog as they come, without ranking.
pub fn compose_fallback(products: &[Product]) -> String {
    if products.is_empty() {
        return UNAVAILABLE_MESSAGE.to_string();
    }

    let suggestions = products
        .iter()
        .take(SUGGESTION_COUNT)
        .map(|p| {
            format!(
                "- {} de {} ({}, talla {}, color {}) por ${:.2}",
                p.name(),
                p.brand(),
                p.category(),
                p.size(),
                p.color(),
                p.price()
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "En este momento no puedo conectarme con el asistente de IA, \
         pero estos son algunos productos de nuestro catálogo:\n{suggestions}\n\n\
         ¿Me cuentas qué talla, color o tipo de zapato buscas para ayudarte mejor?"
    )
}
