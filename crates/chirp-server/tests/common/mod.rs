#![allow(dead_code)]

use std::io::Cursor;
use std::net::{IpAddr, Ipv4Addr};
use std::path::Path;

use chirp_config::{AppConfig, DatabaseConfig, ServerConfig};
use image::{DynamicImage, ImageFormat, RgbImage};

pub fn sqlite_url(dir: &Path) -> String {
    format!("sqlite://{}?mode=rwc", dir.join("chirp.db").display())
}

pub fn config(dir: &Path) -> AppConfig {
    AppConfig {
        secret_key: "test-secret".into(),
        debug: true,
        allowed_hosts: vec![],
        media_root: dir.join("media"),
        max_upload_bytes: 1024 * 1024,
        database: DatabaseConfig {
            url: Some(sqlite_url(dir)),
            name: "chirp".into(),
            user: "chirp".into(),
            password: String::new(),
            host: "localhost".into(),
            port: 5432,
            poll_interval_ms: 50,
            max_connections: 5,
        },
        server: ServerConfig {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 0,
            workers: None,
        },
    }
}

pub fn png_bytes() -> Vec<u8> {
    let img = DynamicImage::ImageRgb8(RgbImage::new(3, 3));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png).unwrap();
    buf.into_inner()
}
