/*!
# zvm DevKit - Stubs et Utilitaires pour Développement

Bibliothèque facilitant les tests de l'inspecteur z/VM avec:
- Mock du SDK z/VM (GuestApi et SdkClient) sans SDK server
- Fixtures d'instances et de réponses SDK
- Harness de test avec expectations sur les appels
*/

pub mod fixtures;
pub mod sdk_stub;
pub mod test_utils;

pub use sdk_stub::{MockCall, MockGuestApi, MockReply, MockSdkClient, SdkOperation};
pub use test_utils::TestHarness;
