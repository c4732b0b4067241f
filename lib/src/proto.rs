// Copyright (c) 2023-2024 The MobileCoin Foundation

//! Protobuf transaction messages
//!
//! Hand-written `prost` mirrors of the partner protocol schemas. Field
//! numbers are part of the device contract and must not change.

/// Swap proposal (legacy and NG)
#[derive(Clone, PartialEq, prost::Message)]
pub struct NewTransactionResponse {
    #[prost(string, tag = "1")]
    pub payin_address: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub payin_extra_id: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub refund_address: ::prost::alloc::string::String,
    #[prost(string, tag = "4")]
    pub refund_extra_id: ::prost::alloc::string::String,
    #[prost(string, tag = "5")]
    pub payout_address: ::prost::alloc::string::String,
    #[prost(string, tag = "6")]
    pub payout_extra_id: ::prost::alloc::string::String,
    #[prost(string, tag = "7")]
    pub currency_from: ::prost::alloc::string::String,
    #[prost(string, tag = "8")]
    pub currency_to: ::prost::alloc::string::String,
    /// Amount in the source currency's smallest unit, big-endian
    #[prost(bytes = "vec", tag = "9")]
    pub amount_to_provider: ::prost::alloc::vec::Vec<u8>,
    #[prost(bytes = "vec", tag = "10")]
    pub amount_to_wallet: ::prost::alloc::vec::Vec<u8>,
    /// 10-character id returned by legacy START_NEW_TRANSACTION
    #[prost(string, tag = "11")]
    pub device_transaction_id: ::prost::alloc::string::String,
    /// 32-byte id returned by NG START_NEW_TRANSACTION
    #[prost(bytes = "vec", tag = "12")]
    pub device_transaction_id_ng: ::prost::alloc::vec::Vec<u8>,
    #[prost(bytes = "vec", tag = "13")]
    pub payin_extra_data: ::prost::alloc::vec::Vec<u8>,
}

/// Unsigned decimal as coefficient * 10^-exponent
#[derive(Clone, PartialEq, prost::Message)]
pub struct UDecimal {
    #[prost(bytes = "vec", tag = "1")]
    pub coefficient: ::prost::alloc::vec::Vec<u8>,
    #[prost(uint32, tag = "2")]
    pub exponent: u32,
}

/// Sell proposal
#[derive(Clone, PartialEq, prost::Message)]
pub struct NewSellResponse {
    #[prost(string, tag = "1")]
    pub trader_email: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub in_currency: ::prost::alloc::string::String,
    #[prost(bytes = "vec", tag = "3")]
    pub in_amount: ::prost::alloc::vec::Vec<u8>,
    #[prost(string, tag = "4")]
    pub in_address: ::prost::alloc::string::String,
    #[prost(string, tag = "5")]
    pub out_currency: ::prost::alloc::string::String,
    #[prost(message, optional, tag = "6")]
    pub out_amount: ::core::option::Option<UDecimal>,
    #[prost(bytes = "vec", tag = "7")]
    pub device_transaction_id: ::prost::alloc::vec::Vec<u8>,
    #[prost(string, tag = "8")]
    pub in_extra_id: ::prost::alloc::string::String,
}

/// Fund proposal
#[derive(Clone, PartialEq, prost::Message)]
pub struct NewFundResponse {
    #[prost(string, tag = "1")]
    pub user_id: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub account_name: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub in_currency: ::prost::alloc::string::String,
    #[prost(bytes = "vec", tag = "4")]
    pub in_amount: ::prost::alloc::vec::Vec<u8>,
    #[prost(string, tag = "5")]
    pub in_address: ::prost::alloc::string::String,
    #[prost(bytes = "vec", tag = "6")]
    pub device_transaction_id: ::prost::alloc::vec::Vec<u8>,
    #[prost(string, tag = "7")]
    pub in_extra_id: ::prost::alloc::string::String,
}
