use crate::{modules, types::Context};
use axum::{
    extract::DefaultBodyLimit,
    http::{header, Method},
    Extension, Router,
};
use std::{io, sync::Arc};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors, services::ServeDir, trace};

pub struct App {
    ctx: Arc<Context>,
    router: Router,
}

impl App {
    pub fn new(ctx: Context) -> Self {
        let ctx = Arc::new(ctx);

        let router = Router::new()
            .nest("/api", modules::get_router())
            .nest_service("/uploads", ServeDir::new(&ctx.storage.upload_dir))
            .with_state(ctx.clone())
            .layer(
                ServiceBuilder::new()
                    .layer(trace::TraceLayer::new_for_http())
                    .layer(
                        cors::CorsLayer::new()
                            .allow_methods([
                                Method::OPTIONS,
                                Method::GET,
                                Method::POST,
                                Method::PUT,
                                Method::DELETE,
                            ])
                            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
                            .allow_origin(cors::Any),
                    )
                    .layer(DefaultBodyLimit::max(1024 * 1024 * 10))
                    .layer(Extension(ctx.clone())),
            );

        Self { ctx, router }
    }

    pub async fn serve(self) -> io::Result<()> {
        let address = format!("{}:{}", self.ctx.app.host, self.ctx.app.port);
        let listener = TcpListener::bind(&address).await?;

        tracing::info!("App is running on {}", address);

        axum::serve(listener, self.router).await
    }
}
