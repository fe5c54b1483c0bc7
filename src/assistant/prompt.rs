use crate::{catalog::Product, history::ChatContext};

pub const DEFAULT_INSTRUCTIONS: &str = "Eres un asistente de ventas para una tienda de zapatos. \
Responde en un tono amable, profesional y conciso. \
Solo recomienda productos del catálogo disponible.";

/// One line per product, in catalog order.
pub fn render_catalog(products: &[Product]) -> String {
    products
        .iter()
        .map(|p| {
            format!(
                "- {} | Marca: {} | Categoría: {} | Talla: {} | Color: {} | Precio: {:?} | Stock: {}",
                p.name(),
                p.brand(),
                p.category(),
                p.size(),
                p.color(),
                p.price(),
                p.stock()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn build_prompt(
    instructions: &str,
    user_message: &str,
    products: &[Product],
    context: &ChatContext,
) -> String {
    format!(
        "{instructions}\n\n\
         Catálogo de productos:\n{catalog}\n\n\
         Historial reciente de la conversación:\n{history}\n\n\
         Mensaje actual del usuario:\nUsuario: {user_message}\n",
        catalog = render_catalog(products),
        history = context.format_for_prompt(),
    )
}
