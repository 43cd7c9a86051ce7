use crate::normalize::discussion_url;
use crate::partition::Partition;
use crate::pipeline::Digest;
use crate::types::{Item, Result};
use serde::Serialize;
use std::io::Write;
use url::Url;

pub const BACKUP_HEADER: &str = "Backup News";

/// Everything a renderer needs to show one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayLine {
    pub href: String,
    pub title: String,
    pub host: String,
    /// Discussion link and comment count, present only when there are comments.
    pub comments: Option<(String, u32)>,
}

impl DisplayLine {
    pub fn for_item(item: &Item, discussion_base: &str) -> Self {
        let href = item.url_or_empty().to_string();
        let host = Url::parse(&href)
            .ok()
            .and_then(|url| url.host_str().map(|h| h.to_string()))
            .unwrap_or_default();

        let comments = match item.descendants {
            Some(count) if count > 0 => Some((discussion_url(discussion_base, item.id), count)),
            _ => None,
        };

        Self {
            href,
            title: item.title_or_empty().to_string(),
            host,
            comments,
        }
    }
}

/// Consumer of the finished lists. Renderers read the partition, never change it.
pub trait Renderer {
    fn render(&mut self, digest: &Digest) -> Result<()>;
}

/// Plain text: the accepted list, then the backup list under its own header.
pub struct TextRenderer<W: Write> {
    out: W,
    discussion_base: String,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W, discussion_base: impl Into<String>) -> Self {
        Self {
            out,
            discussion_base: discussion_base.into(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line(&mut self, item: &Item, note: Option<String>) -> Result<()> {
        let line = DisplayLine::for_item(item, &self.discussion_base);
        write!(self.out, "{} <{}> ({})", line.title, line.href, line.host)?;
        if let Some((href, count)) = &line.comments {
            write!(self.out, " [{} comments <{}>]", count, href)?;
        }
        if let Some(note) = note {
            write!(self.out, " -- {}", note)?;
        }
        writeln!(self.out)?;
        Ok(())
    }

    fn write_partition(&mut self, partition: &Partition) -> Result<()> {
        for item in partition.accepted() {
            self.write_line(item, None)?;
        }

        if !partition.has_backup() {
            return Ok(());
        }

        writeln!(self.out)?;
        writeln!(self.out, "{}", BACKUP_HEADER)?;
        for result in partition.rejected() {
            let note = result.cause.as_ref().map(|cause| cause.to_string());
            self.write_line(&result.item, note)?;
        }
        Ok(())
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn render(&mut self, digest: &Digest) -> Result<()> {
        self.write_partition(&digest.partition)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Pretty-printed JSON of the whole digest.
pub struct JsonRenderer<W: Write> {
    out: W,
}

impl<W: Write> JsonRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for JsonRenderer<W> {
    fn render(&mut self, digest: &Digest) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.out, digest)?;
        writeln!(self.out)?;
        Ok(())
    }
}
