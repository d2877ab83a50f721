use crate::services::templates::extract;
use actix_multipart::Multipart;
use actix_web::{HttpResponse, Responder};
use common::requests::SourceFormat;
use futures_util::StreamExt;

/// HTTP handler wrapper that converts the upload result to an `HttpResponse`.
///
/// - On a readable file: same answers as `/extract`.
/// - On a missing, unsupported or non UTF-8 file: `400 Bad Request` with the message.
pub async fn process(payload: Multipart) -> impl Responder {
    match read_template(payload).await {
        Ok((text, format)) => extract::respond(&text, format),
        Err(e) => HttpResponse::BadRequest().body(format!("Error: {}", e)),
    }
}

/// Reads the `file` part of the multipart body. Other parts are ignored.
async fn read_template(
    mut payload: Multipart,
) -> Result<(String, SourceFormat), Box<dyn std::error::Error>> {
    while let Some(item) = payload.next().await {
        let mut field = item?;
        let part_name = field
            .content_disposition()
            .and_then(|cd| cd.get_name().map(|n| n.to_string()));

        if part_name.as_deref() != Some("file") {
            while let Some(chunk) = field.next().await {
                chunk?;
            }
            continue;
        }

        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename().map(|f| f.to_string()))
            .unwrap_or_default();
        let format = SourceFormat::for_filename(&filename)?;

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            bytes.extend_from_slice(&chunk?);
        }
        let text = String::from_utf8(bytes)
            .map_err(|_| format!("{} no es texto UTF-8", filename))?;
        return Ok((text, format));
    }

    Err("Falta el archivo".into())
}
