// src/core/net.rs

// HTTP/1.0 GET over TCP (std-only)

use std::{error::Error, io::{BufRead, BufReader, Read, Write}, net::TcpStream, time::Duration};

use crate::capture::{NetworkTap, TapReader};

/// Split `http://host[:port]/path` into its parts. Only plain http is supported.
pub fn split_url(url: &str) -> Result<(String, u16, String), Box<dyn Error>> {
    let rest = url
        .strip_prefix("http://")
        .ok_or_else(|| format!("Only http:// URLs are supported: {url}"))?;
    let (authority, path) = match rest.find('/') {
        Some(i) => (&rest[..i], &rest[i..]),
        None => (rest, "/"),
    };
    if authority.is_empty() {
        return Err(format!("Missing host in URL: {url}").into());
    }
    let (host, port) = match authority.rsplit_once(':') {
        Some((h, p)) => (h, p.parse::<u16>()?),
        None => (authority, 80),
    };
    Ok((s!(host), port, s!(path)))
}

/// Fetch a page body. With a tap, the body also goes through the network tap
/// once it has been read completely.
pub fn http_get(url: &str, tap: Option<&NetworkTap>) -> Result<String, Box<dyn Error>> {
    let (host, port, path) = split_url(url)?;
    let mut s = TcpStream::connect((host.as_str(), port))?;
    s.set_read_timeout(Some(Duration::from_secs(15)))?;
    s.set_write_timeout(Some(Duration::from_secs(15)))?;

    let req = format!(
        "GET {} HTTP/1.0\r\nHost: {}\r\nUser-Agent: csg_scrape/0.3\r\nConnection: close\r\n\r\n",
        path, host
    );
    s.write_all(req.as_bytes())?;
    s.flush()?;

    let mut reader = BufReader::new(s);
    let mut status = String::new();
    reader.read_line(&mut status)?;
    if !status.contains(" 200") {
        return Err(format!("HTTP error: {} {}", status.trim_end(), url).into());
    }

    // Skip headers
    loop {
        let mut line = String::new();
        let n = reader.read_line(&mut line)?;
        if n == 0 || line == "\r\n" || line == "\n" { break; }
    }

    let mut body = Vec::new();
    match tap {
        Some(t) => { TapReader::new(reader, t.clone()).read_to_end(&mut body)?; }
        None => { reader.read_to_end(&mut body)?; }
    }
    Ok(String::from_utf8_lossy(&body).into_owned())
}
