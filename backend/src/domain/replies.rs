//! Fixed user-facing reply texts.
//!
//! Replies are Spanish and terse. Internal failure detail never reaches the
//! user; it is logged where the failure is handled.

use super::ports::TextGenerationError;

/// Stock row written or incremented.
pub fn stock_added(quantity: u32, product: &str) -> String {
    format!("Se ha agregado {quantity} {product} al stock.")
}

/// Quantity capture could not be resolved.
pub const INVALID_QUANTITY: &str = "Por favor, proporciona una cantidad válida.";

/// Ledger write failed or timed out.
pub const STOCK_WRITE_FAILED: &str = "Hubo un error al agregar al stock.";

/// Removal commands are recognised but not applied.
pub const REMOVE_UNSUPPORTED: &str = "Todavía no puedo quitar productos del stock.";

/// Export requested for a user with no rows.
pub const STOCK_EMPTY: &str = "Tu stock está vacío.";

/// Report could not be read or written.
pub const EXPORT_FAILED: &str = "No pude generar el archivo de tu stock.";

/// Report upload failed.
pub const DOCUMENT_DELIVERY_FAILED: &str = "No pude enviar el archivo.";

/// Image could not be loaded or uploaded.
pub const IMAGE_DELIVERY_FAILED: &str = "No pude enviar la imagen.";

/// Generic failure of the generative fallback.
pub const REQUEST_FAILED: &str = "Hubo un error al procesar tu solicitud.";

/// Generative fallback answered without text.
pub const NO_RESPONSE: &str = "No recibí ninguna respuesta.";

/// Reply for a failed generation.
pub const fn for_generation_error(error: &TextGenerationError) -> &'static str {
    match error {
        TextGenerationError::Empty => NO_RESPONSE,
        _ => REQUEST_FAILED,
    }
}
