//! QR code rendering for the scannable-code pane.
//!
//! A terminal cannot display the server's PNG, so the pane renders the
//! display-image URL as a QR code directly, using Unicode half-block
//! characters for correct aspect ratio (terminal cells are ~2:1).

use qrcode::{Color, EcLevel, QrCode};

/// Generate QR code lines that fit within the given dimensions.
///
/// Uses half-block characters to pack 2 QR rows into each terminal row.
/// Error correction is lowered step by step until the code fits; if it
/// never fits, a short placeholder message is returned instead.
pub fn generate_qr_code_lines(data: &str, max_width: u16, max_height: u16) -> Vec<String> {
    // Try different error correction levels, from highest to lowest quality
    let ec_levels = [None, Some(EcLevel::M), Some(EcLevel::L)];

    for ec_level in ec_levels {
        let code_result = if let Some(ec) = ec_level {
            QrCode::with_error_correction_level(data, ec)
        } else {
            QrCode::new(data)
        };

        let Ok(code) = code_result else { continue };

        let colors = code.to_colors();
        let size = code.width();
        // Standard 2-module quiet zone
        let quiet_zone = 2;
        let total_size = size + quiet_zone * 2;

        let qr_width = total_size as u16;
        let qr_height = total_size.div_ceil(2) as u16;

        if qr_width > max_width || qr_height > max_height {
            continue;
        }

        // Dark-module lookup with quiet-zone padding.
        let get_color = |x: usize, y: usize| -> bool {
            if x < quiet_zone || y < quiet_zone {
                return false;
            }
            let qx = x - quiet_zone;
            let qy = y - quiet_zone;
            if qx >= size || qy >= size {
                return false;
            }
            colors[qy * size + qx] == Color::Dark
        };

        let mut lines = Vec::with_capacity(qr_height as usize);
        for row_pair in 0..total_size.div_ceil(2) {
            let upper_y = row_pair * 2;
            let lower_y = row_pair * 2 + 1;
            let mut line = String::with_capacity(total_size);

            for x in 0..total_size {
                let upper = get_color(x, upper_y);
                let lower = lower_y < total_size && get_color(x, lower_y);

                let ch = match (upper, lower) {
                    (true, true) => '█',
                    (true, false) => '▀',
                    (false, true) => '▄',
                    (false, false) => ' ',
                };
                line.push(ch);
            }
            lines.push(line);
        }

        log::debug!(
            "QR code fits with ec={:?} -> {}x{} (max: {}x{})",
            ec_level,
            qr_width,
            qr_height,
            max_width,
            max_height
        );
        return lines;
    }

    log::warn!(
        "QR code does not fit in {}x{}, showing URL only",
        max_width,
        max_height
    );
    vec![
        "Terminal too small for code".to_string(),
        String::new(),
        data.to_string(),
    ]
}
