//! 线上 protobuf 消息
//!
//! 与 Garnet 输出的 `GarnetEvent` 字段号保持一致。`link_id` 按 status 的不同
//! 分别表示 router id、外部链路 id 或内部链路 id，在 [`super::EventRecord`]
//! 里立即拆开，不往后传。

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GarnetEvent {
    #[prost(uint64, tag = "1")]
    pub tick: u64,
    #[prost(string, tag = "2")]
    pub status: ::prost::alloc::string::String,
    #[prost(uint64, tag = "3")]
    pub global_id: u64,
    #[prost(uint64, tag = "4")]
    pub packet_id: u64,
    /// flit 在 packet 内的序号
    #[prost(uint32, tag = "5")]
    pub id: u32,
    /// 仅 `RI` 有意义
    #[prost(uint32, tag = "6")]
    pub src: u32,
    /// 仅 `RI` 有意义
    #[prost(uint32, tag = "7")]
    pub dest: u32,
    #[prost(uint32, tag = "8")]
    pub link_id: u32,
}
