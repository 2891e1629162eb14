// src/crawl/filename.rs
// =============================================================================
// This module maps a page URL to the .txt file its text is saved in.
//
// Normal case:
//   https://example.com/blog/post -> text/example.com/example.com_blog_post.txt
//
// The first 8 characters of the URL are dropped, which is exactly the
// length of "https://". For http:// URLs this also eats the first
// character of the host. Existing output depends on these names, so the
// offset stays as it is.
//
// Long URLs: if the name above is longer than 254 characters (the usual
// filesystem limit for one path component) we switch to
//   text/<domain>/<first 20 chars of path>_<10 hex chars of sha256>.txt
// with '?', '&' and '=' replaced by '_', cut to 50 characters in total.
// The cut may eat into the hash and the extension. That is fine, it only
// has to be stable.
//
// Lengths are counted in characters, not bytes, so non-ASCII URLs never
// get split in the middle of a character.
// =============================================================================

use sha2::{Digest, Sha256};

const SCHEME_OFFSET: usize = 8;
const MAX_FILENAME_LEN: usize = 254;
const SHORT_FILENAME_LEN: usize = 50;
const PATH_FRAGMENT_LEN: usize = 20;
const HASH_LEN: usize = 10;

// Derives the relative path a page's text is written to
//
// Parameters:
//   local_domain: host[:port] of the seed URL
//   url: the page URL as it came out of the frontier
//
// Returns: a path relative to the output directory, always starting
// with "text/<local_domain>/"
pub fn derive_filename(local_domain: &str, url: &str) -> String {
    let stripped: String = url.chars().skip(SCHEME_OFFSET).collect();
    let fname = format!("text/{}/{}.txt", local_domain, stripped.replace('/', "_"));

    if fname.chars().count() > MAX_FILENAME_LEN {
        shorten_filename(local_domain, url)
    } else {
        fname
    }
}

// The hash-based fallback for over-long names
fn shorten_filename(local_domain: &str, url: &str) -> String {
    // Everything after the host: "https://a.com/x/y" -> "x/y"
    let after_scheme = url.rsplit("//").next().unwrap_or(url);
    let path = after_scheme
        .split_once('/')
        .map_or(after_scheme, |(_, path)| path);

    let fragment: String = path.replace('/', "_").chars().take(PATH_FRAGMENT_LEN).collect();

    let digest = hex::encode(Sha256::digest(url.as_bytes()));
    let short_hash = &digest[..HASH_LEN];

    let filename = format!("text/{}/{}_{}.txt", local_domain, fragment, short_hash)
        .replace(['?', '&', '='], "_");

    filename.chars().take(SHORT_FILENAME_LEN).collect()
}
