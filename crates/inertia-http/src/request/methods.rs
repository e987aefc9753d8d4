use super::Request;

impl Request {
	/// Returns true if the request was made over HTTPS
	///
	/// Either the connection itself was TLS, or the URI carries an `https` scheme.
	pub fn is_secure(&self) -> bool {
		self.is_secure || self.uri.scheme_str() == Some("https")
	}

	/// Returns the scheme of the request (http or https)
	pub fn scheme(&self) -> &str {
		if self.is_secure() { "https" } else { "http" }
	}

	pub fn path(&self) -> &str {
		self.uri.path()
	}

	pub fn query_string(&self) -> Option<&str> {
		self.uri.query()
	}

	/// Path plus query string, as sent by the client
	///
	/// # Examples
	///
	/// ```
	/// use inertia_http::Request;
	///
	/// let request = Request::builder().uri("/users/?page=2").build().unwrap();
	/// assert_eq!(request.get_full_path(), "/users/?page=2");
	///
	/// let request = Request::builder().uri("/users/").build().unwrap();
	/// assert_eq!(request.get_full_path(), "/users/");
	/// ```
	pub fn get_full_path(&self) -> String {
		match self.uri.query() {
			Some(query) if !query.is_empty() => format!("{}?{}", self.uri.path(), query),
			_ => self.uri.path().to_string(),
		}
	}

	/// Get the host from the Host header, falling back to the URI authority
	pub fn get_host(&self) -> Option<String> {
		self.headers
			.get(hyper::header::HOST)
			.and_then(|h| h.to_str().ok())
			.map(|s| s.to_string())
			.or_else(|| self.uri.authority().map(|a| a.as_str().to_string()))
	}

	/// Build an absolute URI for the request
	///
	/// # Examples
	///
	/// ```
	/// use inertia_http::Request;
	///
	/// let request = Request::builder()
	///     .uri("/api/users?active=1")
	///     .header("host", "example.com")
	///     .secure(true)
	///     .build()
	///     .unwrap();
	///
	/// assert_eq!(request.build_absolute_uri(None), "https://example.com/api/users?active=1");
	/// assert_eq!(
	///     request.build_absolute_uri(Some("/other/path")),
	///     "https://example.com/other/path"
	/// );
	/// ```
	pub fn build_absolute_uri(&self, path: Option<&str>) -> String {
		let scheme = self.scheme();
		let host = self.get_host().unwrap_or_else(|| "localhost".to_string());
		let path = match path {
			Some(path) => path.to_string(),
			None => self.get_full_path(),
		};

		format!("{}://{}{}", scheme, host, path)
	}

	/// Header value as a string, if present and valid UTF-8
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers.get(name).and_then(|v| v.to_str().ok())
	}

	pub fn has_header(&self, name: &str) -> bool {
		self.headers.contains_key(name)
	}

	/// Value of the named cookie from the Cookie header
	pub fn cookie(&self, name: &str) -> Option<String> {
		let cookies = self.header(hyper::header::COOKIE.as_str())?;
		cookies.split(';').find_map(|cookie| {
			let (key, value) = cookie.trim().split_once('=')?;
			(key == name).then(|| value.to_string())
		})
	}
}
