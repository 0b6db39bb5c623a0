use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::thread;

/// Answers a single HTTP request with `status` and `body`.
///
/// Returns the server origin (`http://127.0.0.1:<port>`) and a handle that
/// yields the request line once the response has been written.
pub fn serve_once(status: &str, body: impl Into<Vec<u8>>) -> (String, thread::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let origin = format!("http://{}", listener.local_addr().unwrap());
    let status = status.to_string();
    let body = body.into();
    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());
        let mut request_line = String::new();
        reader.read_line(&mut request_line).unwrap();
        loop {
            let mut header = String::new();
            reader.read_line(&mut header).unwrap();
            if header.trim().is_empty() {
                break;
            }
        }
        write!(
            stream,
            "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            status,
            body.len()
        )
        .unwrap();
        stream.write_all(&body).unwrap();
        request_line
    });
    (origin, handle)
}
