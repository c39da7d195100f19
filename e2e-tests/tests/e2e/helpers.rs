use phish_rs::config::{Config, ModelConfig};
use phish_rs::model::ModelBundle;
use phish_web::ApiServer;
use std::path::Path;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::time::sleep;

/// A phish-web server running on an ephemeral local port
pub struct TestEnv {
    pub base_url: String,
    pub client: reqwest::Client,
    pub dimension: usize,
    shutdown: Option<oneshot::Sender<()>>,
}

impl TestEnv {
    /// Load the demo artifacts and start the server
    pub async fn start() -> Result<Self, String> {
        let models = Path::new(env!("CARGO_MANIFEST_DIR")).join("../phish-rs/models");
        let mut config = Config::default();
        config.server.listen_addr = "127.0.0.1:0".to_string();
        config.model = ModelConfig {
            vectorizer_path: models.join("vectorizer.json").display().to_string(),
            classifier_path: models.join("classifier.json").display().to_string(),
            vectorizer_sha256: None,
            classifier_sha256: None,
        };

        let bundle = ModelBundle::load(&config.model)
            .map_err(|e| format!("Failed to load demo artifacts: {}", e))?;
        let dimension = bundle.dimension();
        let server = ApiServer::new(bundle.email_classifier(), dimension, &config);

        let listener = TcpListener::bind(&config.server.listen_addr)
            .await
            .map_err(|e| format!("Failed to bind: {}", e))?;
        let addr = listener
            .local_addr()
            .map_err(|e| format!("No local address: {}", e))?;

        let (tx, rx) = oneshot::channel::<()>();
        tokio::spawn(async move {
            let shutdown = async {
                let _ = rx.await;
            };
            if let Err(e) = server.serve(listener, shutdown).await {
                eprintln!("phish-web exited with error: {}", e);
            }
        });

        let env = Self {
            base_url: format!("http://{}", addr),
            client: reqwest::Client::new(),
            dimension,
            shutdown: Some(tx),
        };

        env.wait_for_service(&env.url("/health"), 10).await?;
        Ok(env)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Wait for service to be ready
    pub async fn wait_for_service(&self, url: &str, timeout_secs: u64) -> Result<(), String> {
        let start = std::time::Instant::now();

        loop {
            if start.elapsed().as_secs() > timeout_secs {
                return Err(format!("Timeout waiting for service: {}", url));
            }

            match self.client.get(url).send().await {
                Ok(_) => return Ok(()),
                Err(_) => {
                    sleep(Duration::from_millis(100)).await;
                }
            }
        }
    }
}

impl Drop for TestEnv {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

/// Test result summary
pub struct TestResult {
    pub name: String,
    pub passed: bool,
    pub message: String,
    pub duration: Duration,
}

impl TestResult {
    pub fn success(name: String, duration: Duration) -> Self {
        Self {
            name,
            passed: true,
            message: "✅ Test passed".to_string(),
            duration,
        }
    }

    pub fn failure(name: String, message: String, duration: Duration) -> Self {
        Self {
            name,
            passed: false,
            message: format!("❌ Test failed: {}", message),
            duration,
        }
    }

    pub fn print(&self) {
        println!("\n{}", "=".repeat(80));
        println!("📝 Test: {}", self.name);
        println!("⏱️  Duration: {:?}", self.duration);
        println!("{}", self.message);
        println!("{}", "=".repeat(80));
    }
}
