use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use profile_image_server::adapters::inbound::http::dto::{
    ErrorResponseDto, UploadResponseDto, UserProfileDto,
};
use reqwest::{
    StatusCode,
    multipart::{Form, Part},
};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "profile-image-cli")]
#[command(about = "CLI for interacting with the profile image server", long_about = None)]
struct Cli {
    /// Server URL
    #[arg(short, long, env = "PROFILE_IMAGE_URL", default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List user profiles
    List,

    /// Upload a profile image for a user
    Upload {
        /// User id
        user_id: String,
        /// Image file to upload
        file: PathBuf,
        /// MIME type, guessed from the file extension when omitted
        #[arg(long)]
        content_type: Option<String>,
    },
}

/// MIME type for common image extensions
fn guess_content_type(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "tif" | "tiff" => "image/tiff",
        _ => return None,
    };
    Some(mime)
}

fn api_url(base: &str, path: &str) -> String {
    format!("{}/api/v1{}", base.trim_end_matches('/'), path)
}

async fn list(client: &reqwest::Client, base: &str) -> Result<()> {
    let response = client
        .get(api_url(base, "/users"))
        .send()
        .await
        .context("Failed to reach server")?
        .error_for_status()?;

    let profiles: Vec<UserProfileDto> = response.json().await.context("Invalid response body")?;
    for profile in profiles {
        println!(
            "{}\t{}\t{}",
            profile.id,
            profile.username,
            profile.user_profile_image_link.as_deref().unwrap_or("-")
        );
    }

    Ok(())
}

async fn upload(
    client: &reqwest::Client,
    base: &str,
    user_id: &str,
    file: &Path,
    content_type: Option<String>,
) -> Result<()> {
    let data = tokio::fs::read(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let mut part = Part::bytes(data);
    if let Some(name) = file.file_name().and_then(|n| n.to_str()) {
        part = part.file_name(name.to_string());
    }
    let content_type = content_type.or_else(|| guess_content_type(file).map(str::to_string));
    if let Some(content_type) = &content_type {
        part = part
            .mime_str(content_type)
            .with_context(|| format!("Invalid content type '{}'", content_type))?;
    }

    let path = format!("/users/{}/image", urlencoding::encode(user_id));
    let response = client
        .post(api_url(base, &path))
        .multipart(Form::new().part("file", part))
        .send()
        .await
        .context("Failed to reach server")?;

    match response.status() {
        StatusCode::OK => {
            let body: UploadResponseDto = response.json().await.context("Invalid response body")?;
            println!("{}", body.url);
            Ok(())
        }
        StatusCode::NOT_FOUND => bail!("User {} not found", user_id),
        status => match response.json::<ErrorResponseDto>().await {
            Ok(body) => bail!("Upload failed ({}): {} [{}]", status, body.error, body.code),
            Err(_) => bail!("Upload failed ({})", status),
        },
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::List => list(&client, &cli.url).await,
        Commands::Upload {
            user_id,
            file,
            content_type,
        } => upload(&client, &cli.url, &user_id, &file, content_type).await,
    }
}
