//! Send/Sync guarantees for shareable types.

use remote_sync::{
    HttpBatchSyncWriter, HttpBatchWriterBuilder, RemoteSync, SinkWriter, StreamingSyncWriter,
    StreamingWriterBuilder, SyncError,
};
use rstest::rstest;
use static_assertions::assert_impl_all;

#[rstest]
fn builders_are_send_sync() {
    assert_impl_all!(StreamingWriterBuilder: Send, Sync);
    assert_impl_all!(HttpBatchWriterBuilder: Send, Sync);
}

#[rstest]
fn writers_are_send_sync() {
    assert_impl_all!(StreamingSyncWriter: Send, Sync);
    assert_impl_all!(HttpBatchSyncWriter: Send, Sync);
    assert_impl_all!(RemoteSync: Send, Sync);
    assert_impl_all!(SinkWriter: Send, Sync);
    assert_impl_all!(SyncError: Send, Sync);
}
