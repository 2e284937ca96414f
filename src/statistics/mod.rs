use std::sync::atomic::{AtomicU64, Ordering};

/// Map-wide statistics
///
/// Thread-safe statistics tracking for all wide-map operations.
/// Uses atomic counters for lock-free updates.
#[derive(Debug, Default)]
pub struct Statistics {
    // Write path
    pub num_keys_written: AtomicU64,
    pub bytes_written: AtomicU64,

    // Read path
    pub num_keys_read: AtomicU64,
    pub bytes_read: AtomicU64,
    pub num_decode_errors: AtomicU64,

    // Scan path
    pub num_scans: AtomicU64,
    pub num_pages_fetched: AtomicU64,
    pub num_entries_scanned: AtomicU64,

    // Delete path
    pub num_keys_deleted: AtomicU64,
    pub num_range_deletes: AtomicU64,
}

impl Statistics {
    pub fn new() -> Self {
        Statistics::default()
    }

    #[inline]
    pub fn record_write(&self, bytes: u64) {
        self.num_keys_written.fetch_add(1, Ordering::Relaxed);
        self.bytes_written.fetch_add(bytes, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_read(&self, bytes: u64) {
        self.num_keys_read.fetch_add(1, Ordering::Relaxed);
        self.bytes_read.fetch_add(bytes, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_decode_error(&self) {
        self.num_decode_errors.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_scan(&self) {
        self.num_scans.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_page_fetch(&self, entries: u64) {
        self.num_pages_fetched.fetch_add(1, Ordering::Relaxed);
        self.num_entries_scanned
            .fetch_add(entries, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_delete(&self) {
        self.num_keys_deleted.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_range_delete(&self) {
        self.num_range_deletes.fetch_add(1, Ordering::Relaxed);
    }

    // Getters (snapshot values)
    pub fn num_keys_written(&self) -> u64 {
        self.num_keys_written.load(Ordering::Relaxed)
    }

    pub fn num_keys_read(&self) -> u64 {
        self.num_keys_read.load(Ordering::Relaxed)
    }

    pub fn num_keys_deleted(&self) -> u64 {
        self.num_keys_deleted.load(Ordering::Relaxed)
    }

    pub fn num_scans(&self) -> u64 {
        self.num_scans.load(Ordering::Relaxed)
    }

    pub fn num_pages_fetched(&self) -> u64 {
        self.num_pages_fetched.load(Ordering::Relaxed)
    }

    pub fn num_entries_scanned(&self) -> u64 {
        self.num_entries_scanned.load(Ordering::Relaxed)
    }

    pub fn num_range_deletes(&self) -> u64 {
        self.num_range_deletes.load(Ordering::Relaxed)
    }

    pub fn num_decode_errors(&self) -> u64 {
        self.num_decode_errors.load(Ordering::Relaxed)
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written.load(Ordering::Relaxed)
    }

    pub fn bytes_read(&self) -> u64 {
        self.bytes_read.load(Ordering::Relaxed)
    }

    pub fn avg_entries_per_page(&self) -> f64 {
        let entries = self.num_entries_scanned.load(Ordering::Relaxed) as f64;
        let pages = self.num_pages_fetched.load(Ordering::Relaxed) as f64;
        if pages > 0.0 { entries / pages } else { 0.0 }
    }

    /// Reset all statistics to zero
    pub fn reset(&self) {
        self.num_keys_written.store(0, Ordering::Relaxed);
        self.bytes_written.store(0, Ordering::Relaxed);
        self.num_keys_read.store(0, Ordering::Relaxed);
        self.bytes_read.store(0, Ordering::Relaxed);
        self.num_decode_errors.store(0, Ordering::Relaxed);
        self.num_scans.store(0, Ordering::Relaxed);
        self.num_pages_fetched.store(0, Ordering::Relaxed);
        self.num_entries_scanned.store(0, Ordering::Relaxed);
        self.num_keys_deleted.store(0, Ordering::Relaxed);
        self.num_range_deletes.store(0, Ordering::Relaxed);
    }

    /// Get a formatted statistics report
    pub fn report(&self) -> String {
        format!(
            "Wide Map Statistics:\n\
            \n\
            Writes:\n\
            - Keys written:  {}\n\
            - Bytes written: {} ({:.2} MB)\n\
            \n\
            Reads:\n\
            - Keys read:     {}\n\
            - Bytes read:    {} ({:.2} MB)\n\
            - Decode errors: {}\n\
            \n\
            Scans:\n\
            - Scans started: {}\n\
            - Pages fetched: {}\n\
            - Entries:       {}\n\
            - Avg page fill: {:.2}\n\
            \n\
            Deletes:\n\
            - Keys deleted:  {}\n\
            - Range deletes: {}",
            self.num_keys_written(),
            self.bytes_written(),
            self.bytes_written() as f64 / 1024.0 / 1024.0,
            self.num_keys_read(),
            self.bytes_read(),
            self.bytes_read() as f64 / 1024.0 / 1024.0,
            self.num_decode_errors(),
            self.num_scans(),
            self.num_pages_fetched(),
            self.num_entries_scanned(),
            self.avg_entries_per_page(),
            self.num_keys_deleted(),
            self.num_range_deletes(),
        )
    }
}
