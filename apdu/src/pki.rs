// Copyright (c) 2023-2024 The MobileCoin Foundation

//! PKI certificate definitions
//!
//! Trust-dependent payloads (trusted names, instruction descriptors)
//! are only accepted by firmware after a certificate authorizing the
//! matching usage class has been loaded. Certificates are issued per
//! device model; the table below maps `{model, usage}` to the blob to
//! inject. Models without PKI support are an explicit sentinel so that
//! injection degrades to a no-op on the client side while firmware
//! skips the corresponding verification step.

use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Class byte of the PKI certificate command
pub const PKI_CLA: u8 = 0xB0;

/// Instruction byte of the PKI certificate command
pub const PKI_INS: u8 = 0x06;

/// Certificate public key usage classes
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive, strum::Display,
)]
#[repr(u8)]
pub enum CertificateUsage {
    GenuineCheck = 0x01,
    ExchangePayload = 0x02,
    NftMetadata = 0x03,
    TrustedName = 0x04,
    BackupProvider = 0x05,
    RecoverOrchestrator = 0x06,
    PluginMetadata = 0x07,
    CoinMeta = 0x08,
    SeedIdAuth = 0x09,
    TxSimuSigner = 0x0A,
    Calldata = 0x0B,
    Network = 0x0C,
    SwapTemplate = 0x0D,
}

/// Hardware models a certificate can be issued for
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, strum::Display)]
pub enum DeviceModel {
    NanoS,
    NanoSPlus,
    NanoX,
    Stax,
    Flex,
    ApexP,
}

impl DeviceModel {
    /// Whether the model ships the PKI feature at all.
    ///
    /// The Nano S predates device PKI; it is the "unsupported" sentinel
    /// for which injection is a no-op.
    pub fn supports_pki(&self) -> bool {
        !matches!(self, DeviceModel::NanoS)
    }
}

// Test certificates for the trusted-name usage class, one per model.
// Each blob embeds the model's target id and a signature by the
// device-recognised test CA.
const TRUSTED_NAME_CERT_NANOSP: &str = "01010102010211040000000212010013020002140101160400000000200C547275737465645F4E616D6530020004310104320121332102B91FBEC173E3BA4A714E014EBC827B6F899A9FA7F4AC769CDE284317A00F4F6534010135010315473045022100D494B106E217B46BB90BF20A4E9285529C4C8382D9B80FF462F74942579785F802202D68D0F85CD7CA36BDF351FD41332F310E93163BD175F6A92446C14A3329CC8B";
const TRUSTED_NAME_CERT_NANOX: &str = "01010102010211040000000212010013020002140101160400000000200C547275737465645F4E616D6530020004310104320121332102B91FBEC173E3BA4A714E014EBC827B6F899A9FA7F4AC769CDE284317A00F4F653401013501021546304402207FCD665B94B43A6E838E8CD68BE52403D38A7E6A98E2CE291AB1C5D24A41101D02207AB1863E5CB127D9E8A680AC63FF2F2CBEA79CE76652A72832EF154BF1AD6477";
const TRUSTED_NAME_CERT_STAX: &str = "01010102010211040000000212010013020002140101160400000000200C547275737465645F4E616D6530020004310104320121332102B91FBEC173E3BA4A714E014EBC827B6F899A9FA7F4AC769CDE284317A00F4F65340101350104154730450221008F8FB0117C8D51F0D13A77680C18CA98B4B317C3D6C67F23BF9198410BEDF1A1022023B1052CA43E86E2411831990C64B1E027D85E142AD39F480948E3EF9517E55E";
const TRUSTED_NAME_CERT_FLEX: &str = "01010102010211040000000212010013020002140101160400000000200C547275737465645F4E616D6530020004310104320121332102B91FBEC173E3BA4A714E014EBC827B6F899A9FA7F4AC769CDE284317A00F4F6534010135010515473045022100CEF28780DCAFA3A485D83406D519F9AC12FD9B9C3AA7AE798896013F07DD178D022020F01B1AB1D2AAEDA70357F615EAC55E17FE94EC36DF9DE850CEFACBC98D16C8";
const TRUSTED_NAME_CERT_APEX_P: &str = "01010102010211040000000212010013020002140101160400000000200C547275737465645F4E616D6530020004310104320121332102B91FBEC173E3BA4A714E014EBC827B6F899A9FA7F4AC769CDE284317A00F4F6534010135010615463044022059B471F3F7F28EDC959B5854A4811E45454C983E731C3B99EF329A7030592E6F02206AE7716C26A5280F3BCE34E9C8660C7128512AC32D58FB8CA49B80DBD7CED8DC";

// Test certificates for the swap-template usage class.
const SWAP_TEMPLATE_CERT_NANOSP: &str = "010101020102110400000002120100130200021401011604000000002016496E737472756374696F6E5F44657363726970746F723002000F31010D3201213321028E03CDF2147B980260C7800A07199D910D381E6F3F45BF625E805D466E96F03F340101350103154730450221009929503B375B192B1E91AF0B1AA9039E68A399932F30EE74CE376C1C7939CF2002201B1EAB947C29FA7B1D66A15DC8A9208BC363F289EB7EB71F973FF81154094674";
const SWAP_TEMPLATE_CERT_NANOX: &str = "010101020102110400000002120100130200021401011604000000002016496E737472756374696F6E5F44657363726970746F723002000F31010D3201213321028E03CDF2147B980260C7800A07199D910D381E6F3F45BF625E805D466E96F03F34010135010215473045022100E1117D524DA7C153E698EE8E7E592C8630BFF75A2D3CAA4D77A827EA6908B4730220567EFBE3BEA3A4191AAAABFFD8CC608D0787C94C453F733824B436D605FEFD87";
const SWAP_TEMPLATE_CERT_STAX: &str = "010101020102110400000002120100130200021401011604000000002016496E737472756374696F6E5F44657363726970746F723002000F31010D3201213321028E03CDF2147B980260C7800A07199D910D381E6F3F45BF625E805D466E96F03F34010135010415473045022100AE6527E96EF90909D5684856F16500414A28E4630598C1C0B5167CD1B5E2D9AF02202AF82D82937ADC4A08CFD50F196D76D26717817FC98E4B6DEB9208EF9EEFE1E3";
const SWAP_TEMPLATE_CERT_FLEX: &str = "010101020102110400000002120100130200021401011604000000002016496E737472756374696F6E5F44657363726970746F723002000F31010D3201213321028E03CDF2147B980260C7800A07199D910D381E6F3F45BF625E805D466E96F03F3401013501051547304502210092C3A04381DE963C5A514E54AAFCB1353A61E5428F66D9087F57784CECF6FB7302204981F0CEB10FFF93690D2A97254DD3E59DFEB08EFB52BFADCCDC41475A6014F8";
const SWAP_TEMPLATE_CERT_APEX_P: &str = "010101020102110400000002120100130200021401011604000000002016496E737472756374696F6E5F44657363726970746F723002000F31010D3201213321028E03CDF2147B980260C7800A07199D910D381E6F3F45BF625E805D466E96F03F34010135010615463044022063EC1237740F566D2A554079B3E0F9C17064FFDBD9A5B2E9F5246C3E02EA461F02203EF4703F702B30BB0AEE4F4350CE9B792A3CF2CF43FD51F84635EEDD772C54CE";

/// Look up the certificate blob for a model / usage pair.
///
/// Returns `None` for models without PKI support and for usage classes
/// no certificate has been issued for.
pub fn certificate(model: DeviceModel, usage: CertificateUsage) -> Option<Vec<u8>> {
    use CertificateUsage::*;
    use DeviceModel::*;

    let blob = match (model, usage) {
        (NanoSPlus, TrustedName) => TRUSTED_NAME_CERT_NANOSP,
        (NanoX, TrustedName) => TRUSTED_NAME_CERT_NANOX,
        (Stax, TrustedName) => TRUSTED_NAME_CERT_STAX,
        (Flex, TrustedName) => TRUSTED_NAME_CERT_FLEX,
        (ApexP, TrustedName) => TRUSTED_NAME_CERT_APEX_P,
        (NanoSPlus, SwapTemplate) => SWAP_TEMPLATE_CERT_NANOSP,
        (NanoX, SwapTemplate) => SWAP_TEMPLATE_CERT_NANOX,
        (Stax, SwapTemplate) => SWAP_TEMPLATE_CERT_STAX,
        (Flex, SwapTemplate) => SWAP_TEMPLATE_CERT_FLEX,
        (ApexP, SwapTemplate) => SWAP_TEMPLATE_CERT_APEX_P,
        _ => return None,
    };

    hex::decode(blob).ok()
}
