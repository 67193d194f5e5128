use axum::body::{to_bytes, Body};
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;

/// Логирование HTTP-запросов: статус, длительность, размер ответа, метод, путь
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;
    let (parts, body) = response.into_parts();

    // тело читается целиком, чтобы узнать реальный размер
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(b) => b,
        Err(e) => {
            tracing::error!(
                "{} {} {} | {} ms | body error: {}",
                parts.status.as_u16(),
                method,
                path,
                start.elapsed().as_millis(),
                e
            );
            return Response::from_parts(parts, Body::default());
        }
    };

    let status = parts.status.as_u16();
    let elapsed_ms = start.elapsed().as_millis();
    let size = bytes.len();
    if status >= 500 {
        tracing::error!("{} {} {} | {} ms | {} B", status, method, path, elapsed_ms, size);
    } else if status >= 400 {
        tracing::warn!("{} {} {} | {} ms | {} B", status, method, path, elapsed_ms, size);
    } else {
        tracing::info!("{} {} {} | {} ms | {} B", status, method, path, elapsed_ms, size);
    }

    Response::from_parts(parts, Body::from(bytes))
}
